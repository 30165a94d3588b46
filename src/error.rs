//! Unified error types for the NightOwl firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level control loop's error handling uniform.  All variants are `Copy`
//! so they pass through the fault monitor and FSM without allocation.
//!
//! Fatal errors are a separate type: they carry the message and numeric code
//! rendered on the error screen before the device restarts.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The camera driver failed.
    Camera(CameraError),
    /// Display pixel buffer allocation failed.
    Alloc(AllocError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera(e) => write!(f, "camera: {e}"),
            Self::Alloc(e) => write!(f, "alloc: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Camera errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    /// `esp_camera_init` returned an error (carries the esp_err_t code).
    InitFailed(i32),
    /// Sensor handle unavailable after init — tuning could not be applied.
    SensorUnavailable,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed(rc) => write!(f, "init failed (rc={rc})"),
            Self::SensorUnavailable => write!(f, "sensor handle unavailable"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<CameraError> for Error {
    fn from(e: CameraError) -> Self {
        Self::Camera(e)
    }
}

// ---------------------------------------------------------------------------
// Allocation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The heap could not satisfy the pixel buffer request.
    OutOfMemory,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "out of memory"),
        }
    }
}

impl std::error::Error for AllocError {}

impl From<AllocError> for Error {
    fn from(e: AllocError) -> Self {
        Self::Alloc(e)
    }
}

// ---------------------------------------------------------------------------
// Fatal errors
// ---------------------------------------------------------------------------

/// Unrecoverable faults.  Each one is rendered on the display as
/// message + numeric code, then the device restarts (or halts, for the
/// startup variant where no pipeline can run at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalError {
    /// The initial pixel buffer allocation at boot failed.
    StartupAllocation,
    /// Mid-session buffer reallocation failed on every bounded attempt.
    BufferReallocation,
    /// Camera reinitialization failed, or faults persisted through recovery.
    CameraRecovery,
}

impl FatalError {
    /// Numeric code shown on the error screen next to the message.
    pub const fn code(self) -> u8 {
        match self {
            Self::StartupAllocation => 1,
            Self::BufferReallocation => 2,
            Self::CameraRecovery => 3,
        }
    }

    /// Short human-readable message for the error screen.
    pub const fn message(self) -> &'static str {
        match self {
            Self::StartupAllocation => "MEMORY ERROR",
            Self::BufferReallocation => "BUFFER ALLOC",
            Self::CameraRecovery => "CAMERA INIT",
        }
    }
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
