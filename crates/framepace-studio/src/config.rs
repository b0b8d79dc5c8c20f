use winit::dpi::LogicalSize;

/// Demo settings.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub title: String,
    pub size: LogicalSize<f64>,

    /// Pulse renderer rate; `None` renders on every display refresh.
    pub pulse_rate: Option<f64>,

    /// How often the title-bar overlay refreshes.
    pub overlay_rate: f64,

    /// Seconds per full hue cycle of the pulse renderer.
    pub pulse_period: f64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            title: "framepace studio".to_string(),
            size: LogicalSize::new(820.0, 560.0),
            pulse_rate: None,
            overlay_rate: 1.0,
            pulse_period: 6.0,
        }
    }
}
