mod localstack;

pub use self::localstack::start_localstack;
