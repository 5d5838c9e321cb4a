pub mod time;
pub mod time_getter;

/// Turns a type name into a `&'static str` for log messages
#[macro_export]
macro_rules! struct_name {
    ($t:ident) => {
        stringify!($t)
    };
}
