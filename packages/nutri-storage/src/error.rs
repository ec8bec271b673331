#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Neo4j(neo4rs::Error),
	#[error("Failed to decode graph row: {0}")]
	Decode(String),
	#[error("Graph query timed out after {timeout_ms} ms.")]
	Timeout { timeout_ms: u64 },
	#[error("Graph store is unavailable: {0}")]
	Unavailable(String),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}
impl Error {
	/// Whether the failure means the store itself cannot be reached.
	pub fn is_unavailable(&self) -> bool {
		matches!(self, Self::Unavailable(_))
	}
}
impl From<neo4rs::Error> for Error {
	/// Transport and session failures (pool exhaustion surfaces from the driver as
	/// `ConnectionError`) mean the store is out of reach. Everything else is a query failure.
	fn from(err: neo4rs::Error) -> Self {
		match err {
			neo4rs::Error::IOError { .. }
			| neo4rs::Error::ConnectionError
			| neo4rs::Error::AuthenticationError { .. } => Self::Unavailable(err.to_string()),
			other => Self::Neo4j(other),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::io::{self, ErrorKind};

	use super::*;

	#[test]
	fn lost_connection_is_unavailable() {
		assert!(Error::from(neo4rs::Error::ConnectionError).is_unavailable());
	}

	#[test]
	fn socket_failure_is_unavailable() {
		let io = io::Error::new(ErrorKind::ConnectionReset, "connection reset by peer");

		assert!(Error::from(neo4rs::Error::from(io)).is_unavailable());
	}

	#[test]
	fn query_level_failures_stay_contained() {
		let err = Error::from(neo4rs::Error::UnexpectedMessage("FAILURE".to_string()));

		assert!(matches!(err, Error::Neo4j(_)));
		assert!(!err.is_unavailable());
		assert!(!Error::Timeout { timeout_ms: 10 }.is_unavailable());
		assert!(!Error::Decode("bad row".to_string()).is_unavailable());
	}
}
