//! Macros for reducing boilerplate when writing records by hand

/// Build a [`Record`](crate::core::entity::Record) from `field => value` pairs
///
/// Values go through `Into<FieldValue>`, so strings, numbers, booleans,
/// timestamps and `Vec<&str>` lists can be written directly.
///
/// # Example
/// ```rust
/// use estate::record;
///
/// let announcement = record! {
///     "title" => "Pool Party",
///     "status" => "Published",
///     "targetAudience" => "All",
///     "targetProperties" => Vec::<String>::new(),
/// };
/// assert_eq!(announcement.len(), 4);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::core::entity::Record::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::core::entity::Record::new();
        $(
            record.set($field, $value);
        )+
        record
    }};
}
