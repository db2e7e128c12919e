//! OHLC candles: a body between open and close plus wicks to high and low.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::charts::{Drawable, clamp_progress};
use crate::core::constants::{DEFAULT_AXIS_STEPS, DEFAULT_PRICE_PADDING};
use crate::core::convert::{decimal_to_f64, timestamp_label};
use crate::core::{
    Animation, AxisConfig, ChartContext, ChartPoint, CornerRadii, CornerRadius, Point, Rect,
    calculate_min_max_with_padding, sample_x_labels,
};
use crate::error::{
    ChartError, ChartResult, ensure_config_fraction, ensure_config_non_negative,
};
use crate::interaction::HitTarget;
use crate::render::{Color, LinePrimitive, Paint, RectPrimitive, RenderFrame, StrokeCap};

const DEFAULT_DOJI_THRESHOLD: f64 = 0.01;

/// One validated OHLC candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleData {
    label: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: Option<f64>,
}

impl CandleData {
    /// Builds a validated candle.
    ///
    /// Invariants:
    /// - all prices are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(
        label: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> ChartResult<Self> {
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(ChartError::InvalidData(
                "candle prices must be finite".to_owned(),
            ));
        }
        if low > high {
            return Err(ChartError::InvalidData(
                "candle low must be <= high".to_owned(),
            ));
        }
        if open < low || open > high {
            return Err(ChartError::InvalidData(
                "candle open must be within low/high range".to_owned(),
            ));
        }
        if close < low || close > high {
            return Err(ChartError::InvalidData(
                "candle close must be within low/high range".to_owned(),
            ));
        }
        Ok(Self {
            label: label.into(),
            open,
            high,
            low,
            close,
            volume: None,
        })
    }

    /// Converts decimal prices into a validated candle.
    pub fn from_decimal(
        label: impl Into<String>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            label,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// Candle labelled by formatting `time` with a `chrono` pattern.
    pub fn at_time(
        time: DateTime<Utc>,
        pattern: &str,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> ChartResult<Self> {
        Self::new(timestamp_label(time, pattern), open, high, low, close)
    }

    pub fn with_volume(mut self, volume: f64) -> ChartResult<Self> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(ChartError::InvalidData(
                "candle volume must be finite and >= 0".to_owned(),
            ));
        }
        self.volume = Some(volume);
        Ok(self)
    }

    #[must_use]
    pub fn open(&self) -> f64 {
        self.open
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    #[must_use]
    pub fn close(&self) -> f64 {
        self.close
    }

    #[must_use]
    pub fn volume(&self) -> Option<f64> {
        self.volume
    }

    /// `close >= open`.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    #[must_use]
    pub fn is_bearish(&self) -> bool {
        !self.is_bullish()
    }

    #[must_use]
    pub fn body_height(&self) -> f64 {
        (self.close - self.open).abs()
    }

    #[must_use]
    pub fn upper_wick_length(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    #[must_use]
    pub fn lower_wick_length(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Body smaller than `threshold` of the high-low range; a flat candle is
    /// always a doji.
    #[must_use]
    pub fn is_doji_with(&self, threshold: f64) -> bool {
        let range = self.high - self.low;
        range == 0.0 || self.body_height() / range < threshold
    }

    #[must_use]
    pub fn is_doji(&self) -> bool {
        self.is_doji_with(DEFAULT_DOJI_THRESHOLD)
    }
}

impl ChartPoint for CandleData {
    fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> f64 {
        self.close
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickChartConfig {
    pub candle_width_fraction: f64,
    /// Wick stroke width as a share of the candle width.
    pub wick_width_fraction: f64,
    /// Pixel floor for the body so flat candles stay visible.
    pub min_candle_body_height: f64,
    pub show_wicks: bool,
    pub corner_radius: CornerRadius,
    pub bullish_paint: Paint,
    pub bearish_paint: Paint,
    pub animation: Animation,
}

impl Default for CandlestickChartConfig {
    fn default() -> Self {
        Self {
            candle_width_fraction: 0.7,
            wick_width_fraction: 0.1,
            min_candle_body_height: 2.0,
            show_wicks: true,
            corner_radius: CornerRadius::None,
            bullish_paint: Paint::solid(Color::from_hex_rgb(0x4CAF50)),
            bearish_paint: Paint::solid(Color::from_hex_rgb(0xF44336)),
            animation: Animation::default(),
        }
    }
}

impl CandlestickChartConfig {
    pub fn with_candle_width_fraction(mut self, fraction: f64) -> ChartResult<Self> {
        self.candle_width_fraction = fraction;
        self.validate()?;
        Ok(self)
    }

    pub fn with_wick_width_fraction(mut self, fraction: f64) -> ChartResult<Self> {
        self.wick_width_fraction = fraction;
        self.validate()?;
        Ok(self)
    }

    pub fn with_min_candle_body_height(mut self, height: f64) -> ChartResult<Self> {
        self.min_candle_body_height = height;
        self.validate()?;
        Ok(self)
    }

    pub fn with_corner_radius(mut self, corner_radius: CornerRadius) -> ChartResult<Self> {
        self.corner_radius = corner_radius;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_show_wicks(mut self, show_wicks: bool) -> Self {
        self.show_wicks = show_wicks;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_fraction(self.candle_width_fraction, "candle width fraction")?;
        ensure_config_fraction(self.wick_width_fraction, "wick width fraction")?;
        ensure_config_non_negative(self.min_candle_body_height, "min candle body height")?;
        self.corner_radius.validate()?;
        self.bullish_paint.validate()?;
        self.bearish_paint.validate()?;
        self.animation.validate()
    }
}

impl_json_config!(CandlestickChartConfig, "candlestick chart config");

/// Price axis over every low and high, padded by 5% on both ends.
pub fn resolve_axis(candles: &[CandleData]) -> ChartResult<AxisConfig> {
    let prices: Vec<f64> = candles.iter().flat_map(|c| [c.low, c.high]).collect();
    let (min, max) = calculate_min_max_with_padding(&prices, DEFAULT_PRICE_PADDING);
    Ok(AxisConfig::from_data_range(min, max, DEFAULT_AXIS_STEPS)?
        .with_draw_axis_at_zero(false))
}

/// Category labels, thinned to five evenly spaced ones past ten candles.
#[must_use]
pub fn candle_labels(candles: &[CandleData]) -> Vec<String> {
    let labels: Vec<String> = candles.iter().map(|c| c.label.clone()).collect();
    sample_x_labels(&labels)
}

/// Projected candle in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub body: RectPrimitive,
    pub upper_wick: Option<LinePrimitive>,
    pub lower_wick: Option<LinePrimitive>,
    pub is_bullish: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandlestickGeometry {
    pub candles: Vec<CandleGeometry>,
    pub hit_targets: Vec<HitTarget<usize>>,
}

impl Drawable for CandlestickGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        for candle in &self.candles {
            if let Some(wick) = &candle.upper_wick {
                frame.push(wick.clone());
            }
            if let Some(wick) = &candle.lower_wick {
                frame.push(wick.clone());
            }
            frame.push(candle.body.clone());
        }
    }
}

/// Projects candles into render geometry.
///
/// Everything grows up from the plot bottom: `y' = bottom - (bottom - y) * progress`.
/// Bullish bodies round their top corners and bearish bodies their bottom
/// corners. Wicks are emitted only when they extend past the body.
pub fn project_candles(
    candles: &[CandleData],
    config: &CandlestickChartConfig,
    ctx: ChartContext,
    progress: f64,
) -> ChartResult<CandlestickGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let count = candles.len();

    #[cfg(feature = "parallel-projection")]
    let projected: Vec<CandleGeometry> = candles
        .par_iter()
        .enumerate()
        .map(|(index, candle)| project_single_candle(candle, index, count, config, ctx, progress))
        .collect();

    #[cfg(not(feature = "parallel-projection"))]
    let projected: Vec<CandleGeometry> = candles
        .iter()
        .enumerate()
        .map(|(index, candle)| project_single_candle(candle, index, count, config, ctx, progress))
        .collect();

    let hit_targets = projected
        .iter()
        .enumerate()
        .map(|(index, candle)| HitTarget::rect(candle.body.rect, index))
        .collect();

    debug!(
        candles = count,
        min = ctx.min_value(),
        max = ctx.max_value(),
        progress,
        "projected candlestick chart"
    );
    Ok(CandlestickGeometry {
        candles: projected,
        hit_targets,
    })
}

fn project_single_candle(
    candle: &CandleData,
    index: usize,
    count: usize,
    config: &CandlestickChartConfig,
    ctx: ChartContext,
    progress: f64,
) -> CandleGeometry {
    let left = ctx.bar_left(index, count, config.candle_width_fraction);
    let width = ctx.bar_width(count, config.candle_width_fraction);
    let center_x = left + width / 2.0;
    let bottom = ctx.bottom();
    let grow = |y: f64| bottom - (bottom - y) * progress;

    let open_y = ctx.convert_value_to_y(candle.open);
    let close_y = ctx.convert_value_to_y(candle.close);
    let body_height = (close_y - open_y).abs();
    let (body_top, body_height) = if body_height < config.min_candle_body_height {
        (
            (open_y + close_y - config.min_candle_body_height) / 2.0,
            config.min_candle_body_height,
        )
    } else {
        (open_y.min(close_y), body_height)
    };

    let top = grow(body_top);
    let body_bottom = top + body_height * progress;
    let high_y = grow(ctx.convert_value_to_y(candle.high));
    let low_y = grow(ctx.convert_value_to_y(candle.low));

    let is_bullish = candle.is_bullish();
    let paint = if is_bullish {
        config.bullish_paint.clone()
    } else {
        config.bearish_paint.clone()
    };
    let radius = config.corner_radius.value();
    let corners = if is_bullish {
        CornerRadii::top(radius)
    } else {
        CornerRadii::bottom(radius)
    };

    let wick_width = width * config.wick_width_fraction;
    let wick = |from: f64, to: f64| {
        (config.show_wicks && wick_width > 0.0).then(|| {
            LinePrimitive::new(
                Point::new(center_x, from),
                Point::new(center_x, to),
                wick_width,
                paint.clone(),
            )
            .with_cap(StrokeCap::Butt)
        })
    };
    let upper_wick = if high_y < top { wick(high_y, top) } else { None };
    let lower_wick = if low_y > body_bottom {
        wick(body_bottom, low_y)
    } else {
        None
    };

    CandleGeometry {
        center_x,
        body: RectPrimitive::new(Rect::new(left, top, left + width, body_bottom), paint)
            .with_corner_radii(corners),
        upper_wick,
        lower_wick,
        is_bullish,
    }
}
