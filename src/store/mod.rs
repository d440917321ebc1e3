pub mod datatype;
pub mod key;
pub mod record;
pub mod records;

pub use datatype::DataType;
pub use key::Key;
pub use record::Record;
pub use records::RecordStore;
