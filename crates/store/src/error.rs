// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested health check was not found.
    HealthCheckNotFound(i64),
    /// A write carried a version that no longer matches the stored record.
    VersionConflict {
        health_check_id: i64,
        expected: i64,
        actual: i64,
    },
    /// An insert collided with a record that already exists.
    DuplicateRecord { record: String, id: i64 },
    /// A backend error occurred.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HealthCheckNotFound(id) => write!(f, "Health check not found: {id}"),
            Self::VersionConflict {
                health_check_id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Version conflict on health check {health_check_id}: write carried version {expected}, store holds {actual}"
                )
            }
            Self::DuplicateRecord { record, id } => {
                write!(f, "Duplicate {record} with id {id}")
            }
            Self::Backend(msg) => write!(f, "Backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
