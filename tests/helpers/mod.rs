
pub use test_mysql::TestMySql;
