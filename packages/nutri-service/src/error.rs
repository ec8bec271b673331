pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Graph store unavailable: {message}")]
	StoreUnavailable { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<nutri_storage::Error> for Error {
	fn from(err: nutri_storage::Error) -> Self {
		match err {
			nutri_storage::Error::Unavailable(message) => Self::StoreUnavailable { message },
			nutri_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			other => Self::Storage { message: other.to_string() },
		}
	}
}
