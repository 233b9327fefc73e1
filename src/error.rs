//! Error types for the particle field.
//!
//! Configuration mistakes are reported when the engine is built. Everything
//! else here is environmental (no GPU, no window) and is handled by the host
//! by degrading to a static backdrop rather than taking the page down.

use std::fmt;

/// Invalid [`EngineConfig`](crate::EngineConfig) values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The palette has no colors to pick from.
    EmptyPalette,
    /// Symbol particles are enabled but the symbol set is empty.
    EmptySymbols,
    /// A distance threshold is neither zero nor a finite value of at least
    /// [`MIN_THRESHOLD`](crate::config::MIN_THRESHOLD).
    InvalidThreshold { name: &'static str, value: f32 },
    /// Base speed is negative, infinite or NaN.
    InvalidSpeed(f32),
    /// Size range is empty, inverted, negative or unbounded.
    InvalidSizeRange { min: f32, max: f32 },
    /// Symbol probability is outside `0.0..=1.0`.
    InvalidProbability(f32),
    /// Font size must be positive and finite.
    InvalidFontSize(f32),
    /// A strength, style or animation value is negative, infinite or NaN.
    InvalidValue { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPalette => write!(f, "Palette must contain at least one color"),
            ConfigError::EmptySymbols => write!(f, "Symbol set is empty but symbol probability is non-zero"),
            ConfigError::InvalidThreshold { name, value } => {
                write!(f, "{} must be 0 or a finite number of at least {}, got {}", name, crate::config::MIN_THRESHOLD, value)
            }
            ConfigError::InvalidSpeed(v) => write!(f, "Base speed must be a finite non-negative number, got {}", v),
            ConfigError::InvalidSizeRange { min, max } => {
                write!(f, "Size range {}..{} must be finite, non-negative and non-empty", min, max)
            }
            ConfigError::InvalidProbability(p) => write!(f, "Symbol probability must be in 0..=1, got {}", p),
            ConfigError::InvalidFontSize(s) => write!(f, "Font size must be positive and finite, got {}", s),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "{} must be a finite non-negative number, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reasons the presenter could not put frames on the window.
///
/// None of these are fatal to the host: it logs the error and keeps an empty
/// window instead of animating.
#[derive(Debug)]
pub enum GpuError {
    /// The window cannot back a wgpu surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the window surface.
    NoAdapter,
    /// The adapter refused to open a device.
    Device(wgpu::RequestDeviceError),
    /// The surface lists no texture format to present in.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::Surface(e) => write!(f, "Window surface unavailable for the backdrop: {}", e),
            GpuError::NoAdapter => write!(f, "No GPU adapter can present the backdrop"),
            GpuError::Device(e) => write!(f, "Could not open a device for the backdrop: {}", e),
            GpuError::NoSurfaceFormat => write!(f, "Window surface offers no presentable format"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::Surface(e) => Some(e),
            GpuError::Device(e) => Some(e),
            GpuError::NoAdapter | GpuError::NoSurfaceFormat => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::Surface(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::Device(e)
    }
}

/// Errors that can occur when running the backdrop window.
#[derive(Debug)]
pub enum FieldError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The engine configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            FieldError::Window(e) => write!(f, "Failed to create window: {}", e),
            FieldError::Gpu(e) => write!(f, "GPU error: {}", e),
            FieldError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::EventLoop(e) => Some(e),
            FieldError::Window(e) => Some(e),
            FieldError::Gpu(e) => Some(e),
            FieldError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for FieldError {
    fn from(e: winit::error::EventLoopError) -> Self {
        FieldError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for FieldError {
    fn from(e: winit::error::OsError) -> Self {
        FieldError::Window(e)
    }
}

impl From<GpuError> for FieldError {
    fn from(e: GpuError) -> Self {
        FieldError::Gpu(e)
    }
}

impl From<ConfigError> for FieldError {
    fn from(e: ConfigError) -> Self {
        FieldError::Config(e)
    }
}
