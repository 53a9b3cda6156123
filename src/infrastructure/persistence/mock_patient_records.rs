use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::ports::{DatabaseError, PatientRecordConnection, PatientRecordConnector};
use crate::domain::PatientIdentifier;

#[derive(Default)]
struct MockState {
    fail_connect: bool,
    fail_statement: bool,
    known_patients: Option<Vec<String>>,
    opened: AtomicU32,
    closed: AtomicU32,
    last_closed: AtomicBool,
    updates: Mutex<Vec<String>>,
}

/// In-memory stand-in for the patient database that records what was executed
/// and whether every opened connection was closed again.
#[derive(Clone, Default)]
pub struct MockPatientRecords {
    state: Arc<MockState>,
}

impl MockPatientRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only these identifiers match a row; others affect zero rows.
    pub fn with_patients(patients: &[&str]) -> Self {
        Self::from_state(MockState {
            known_patients: Some(patients.iter().map(|p| p.to_string()).collect()),
            ..MockState::default()
        })
    }

    pub fn failing_statement() -> Self {
        Self::from_state(MockState {
            fail_statement: true,
            ..MockState::default()
        })
    }

    pub fn failing_connect() -> Self {
        Self::from_state(MockState {
            fail_connect: true,
            ..MockState::default()
        })
    }

    fn from_state(state: MockState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn updates(&self) -> Vec<String> {
        self.state
            .updates
            .lock()
            .map(|u| u.clone())
            .unwrap_or_default()
    }

    pub fn connections_opened(&self) -> u32 {
        self.state.opened.load(Ordering::SeqCst)
    }

    pub fn connections_closed(&self) -> u32 {
        self.state.closed.load(Ordering::SeqCst)
    }

    pub fn last_connection_closed(&self) -> bool {
        self.state.last_closed.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PatientRecordConnector for MockPatientRecords {
    async fn connect(&self) -> Result<Box<dyn PatientRecordConnection>, DatabaseError> {
        if self.state.fail_connect {
            return Err(DatabaseError::ConnectionFailed(
                "mock connection refused".to_string(),
            ));
        }
        self.state.opened.fetch_add(1, Ordering::SeqCst);
        self.state.last_closed.store(false, Ordering::SeqCst);
        Ok(Box::new(MockConnection {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockConnection {
    state: Arc<MockState>,
}

#[async_trait::async_trait]
impl PatientRecordConnection for MockConnection {
    async fn mark_complete(&mut self, patient: &PatientIdentifier) -> Result<u64, DatabaseError> {
        if self.state.fail_statement {
            return Err(DatabaseError::QueryFailed("mock statement failure".to_string()));
        }
        if let Ok(mut updates) = self.state.updates.lock() {
            updates.push(patient.as_str().to_string());
        }
        let matched = match &self.state.known_patients {
            Some(known) => known.iter().any(|p| p == patient.as_str()),
            None => true,
        };
        Ok(u64::from(matched))
    }

    async fn close(self: Box<Self>) -> Result<(), DatabaseError> {
        self.state.closed.fetch_add(1, Ordering::SeqCst);
        self.state.last_closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
