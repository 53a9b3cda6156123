mod mock_patient_records;
mod mysql_patient_records;

pub use mock_patient_records::MockPatientRecords;
pub use mysql_patient_records::{DatabaseEndpoint, MySqlPatientRecordConnector};
