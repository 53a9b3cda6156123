use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::Connection;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use tracing::instrument;

use crate::application::ports::{DatabaseError, PatientRecordConnection, PatientRecordConnector};
use crate::domain::PatientIdentifier;

const DEFAULT_PORT: u16 = 3306;

const MARK_COMPLETE_SQL: &str = "UPDATE patient SET status = 'complete' WHERE email = ?";

/// `host[:port]` of the database server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseEndpoint {
    pub host: String,
    pub port: u16,
}

impl FromStr for DatabaseEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) = match s.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|e| format!("Invalid database port '{}': {}", port, e))?;
                (host, port)
            }
            None => (s, DEFAULT_PORT),
        };

        if host.is_empty() {
            return Err(format!("Invalid database endpoint: '{}'", s));
        }

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for DatabaseEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

pub struct MySqlPatientRecordConnector {
    options: MySqlConnectOptions,
    endpoint: DatabaseEndpoint,
}

impl MySqlPatientRecordConnector {
    pub fn new(endpoint: DatabaseEndpoint, user: &str, password: &str, database: &str) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&endpoint.host)
            .port(endpoint.port)
            .username(user)
            .password(password)
            .database(database);

        Self { options, endpoint }
    }
}

#[async_trait]
impl PatientRecordConnector for MySqlPatientRecordConnector {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn connect(&self) -> Result<Box<dyn PatientRecordConnection>, DatabaseError> {
        let connection = MySqlConnection::connect_with(&self.options)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        tracing::debug!("Patient record connection opened");
        Ok(Box::new(MySqlPatientRecordConnection { connection }))
    }
}

struct MySqlPatientRecordConnection {
    connection: MySqlConnection,
}

#[async_trait]
impl PatientRecordConnection for MySqlPatientRecordConnection {
    #[instrument(skip(self), fields(patient = %patient))]
    async fn mark_complete(&mut self, patient: &PatientIdentifier) -> Result<u64, DatabaseError> {
        let mut tx = self
            .connection
            .begin()
            .await
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let result = sqlx::query(MARK_COMPLETE_SQL)
            .bind(patient.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::CommitFailed(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn close(self: Box<Self>) -> Result<(), DatabaseError> {
        self.connection
            .close()
            .await
            .map_err(|e| DatabaseError::CloseFailed(e.to_string()))
    }
}
