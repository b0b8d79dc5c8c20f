/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM).
    Fatal,
}

impl SurfaceErrorAction {
    pub fn from_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_surface_errors() {
        use wgpu::SurfaceError as E;
        use SurfaceErrorAction as A;

        assert_eq!(A::from_error(&E::Lost), A::Reconfigured);
        assert_eq!(A::from_error(&E::Outdated), A::Reconfigured);
        assert_eq!(A::from_error(&E::OutOfMemory), A::Fatal);
        assert_eq!(A::from_error(&E::Timeout), A::SkipFrame);
        assert_eq!(A::from_error(&E::Other), A::SkipFrame);
    }
}
