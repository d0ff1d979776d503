//! # Internal Macros
//!
//! `le_accessors!` expands a list of `field: native_type` pairs into a getter
//! and a `set_` setter per field, for structs whose fields are zerocopy
//! byte-order wrappers. Callers see native integers; the little-endian
//! representation stays inside the struct.
//!
//! ```ignore
//! impl PageHeader {
//!     le_accessors! {
//!         row_count: u32,
//!         column_count: u16,
//!     }
//! }
//!
//! header.set_row_count(12);
//! assert_eq!(header.row_count(), 12);
//! ```

#[macro_export]
macro_rules! le_accessors {
    ($($field:ident : $native:ty),* $(,)?) => {
        ::paste::paste! {
            $(
                #[inline]
                pub fn $field(&self) -> $native {
                    self.$field.get()
                }

                #[inline]
                pub fn [<set_ $field>](&mut self, value: $native) {
                    self.$field.set(value);
                }
            )*
        }
    };
}
