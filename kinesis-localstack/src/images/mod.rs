mod localstack;

pub use self::localstack::LocalStack;
