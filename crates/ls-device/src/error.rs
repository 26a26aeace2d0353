use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device UDID must not be empty")]
    EmptyUdid,
}

pub type DeviceResult<T> = Result<T, DeviceError>;
