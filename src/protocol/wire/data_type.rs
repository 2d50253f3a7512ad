use crate::protocol::Collation;
use enumflags2::{bitflags, BitFlags};

uint_enum! {
    /// The type tag of a column definition, as sent by the server in result
    /// metadata and expected back for bound parameters.
    #[repr(u8)]
    pub enum ColumnTag {
        Decimal = 0x00,
        Tiny = 0x01,
        Short = 0x02,
        Long = 0x03,
        Float = 0x04,
        Double = 0x05,
        Null = 0x06,
        Timestamp = 0x07,
        LongLong = 0x08,
        Int24 = 0x09,
        Date = 0x0A,
        Time = 0x0B,
        Datetime = 0x0C,
        Year = 0x0D,
        VarChar = 0x0F,
        Bit = 0x10,
        Json = 0xF5,
        NewDecimal = 0xF6,
        Enum = 0xF7,
        Set = 0xF8,
        TinyBlob = 0xF9,
        MediumBlob = 0xFA,
        LongBlob = 0xFB,
        Blob = 0xFC,
        VarString = 0xFD,
        String = 0xFE,
        Geometry = 0xFF,
    }
}

impl ColumnTag {
    /// True for the large-object family. The same tags double as the TEXT
    /// types when the column's collation is not binary.
    pub fn is_lob(self) -> bool {
        matches!(
            self,
            ColumnTag::TinyBlob | ColumnTag::MediumBlob | ColumnTag::LongBlob | ColumnTag::Blob
        )
    }

    /// True for the variable-length character types.
    pub fn is_var_char(self) -> bool {
        matches!(self, ColumnTag::VarChar | ColumnTag::VarString)
    }

    /// The SQL name of the type, as used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ColumnTag::Decimal | ColumnTag::NewDecimal => "decimal",
            ColumnTag::Tiny => "tinyint",
            ColumnTag::Short => "smallint",
            ColumnTag::Long => "int",
            ColumnTag::Float => "float",
            ColumnTag::Double => "double",
            ColumnTag::Null => "null",
            ColumnTag::Timestamp => "timestamp",
            ColumnTag::LongLong => "bigint",
            ColumnTag::Int24 => "mediumint",
            ColumnTag::Date => "date",
            ColumnTag::Time => "time",
            ColumnTag::Datetime => "datetime",
            ColumnTag::Year => "year",
            ColumnTag::VarChar | ColumnTag::VarString => "varchar",
            ColumnTag::Bit => "bit",
            ColumnTag::Json => "json",
            ColumnTag::Enum => "enum",
            ColumnTag::Set => "set",
            ColumnTag::TinyBlob => "tinytext",
            ColumnTag::MediumBlob => "mediumtext",
            ColumnTag::LongBlob => "longtext",
            ColumnTag::Blob => "text",
            ColumnTag::String => "char",
            ColumnTag::Geometry => "geometry",
        }
    }
}

/// A flag from a column definition packet.
#[bitflags]
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFlag {
    NotNull = 0x0001,
    PrimaryKey = 0x0002,
    UniqueKey = 0x0004,
    MultipleKey = 0x0008,
    Blob = 0x0010,
    Unsigned = 0x0020,
    ZeroFill = 0x0040,
    Binary = 0x0080,
    Enumeration = 0x0100,
    AutoIncrement = 0x0200,
    Timestamp = 0x0400,
    Set = 0x0800,
    NoDefaultValue = 0x1000,
    OnUpdateNow = 0x2000,
}

/// Metadata for one column or statement parameter, as declared by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    r#type: ColumnTag,
    precision: Option<u32>,
    collation: Collation,
    flags: BitFlags<ColumnFlag>,
}

impl ColumnDescriptor {
    pub fn new(r#type: ColumnTag, precision: Option<u32>, collation: Collation) -> Self {
        Self {
            r#type,
            precision,
            collation,
            flags: BitFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: BitFlags<ColumnFlag>) -> Self {
        self.flags = flags;
        self
    }

    /// Get the descriptor's type tag.
    pub fn r#type(&self) -> ColumnTag {
        self.r#type
    }

    /// Get the descriptor's numeric precision, if declared.
    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    /// Get the descriptor's collation.
    pub fn collation(&self) -> Collation {
        self.collation
    }

    /// Get the descriptor's column definition flags.
    pub fn flags(&self) -> BitFlags<ColumnFlag> {
        self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_from_raw_value() {
        assert_eq!(Ok(ColumnTag::Tiny), ColumnTag::try_from(0x01));
        assert_eq!(Ok(ColumnTag::Bit), ColumnTag::try_from(0x10));
        assert_eq!(Ok(ColumnTag::LongBlob), ColumnTag::try_from(0xFB));
        assert_eq!(Err(()), ColumnTag::try_from(0x11));
    }

    #[test]
    fn lob_family() {
        assert!(ColumnTag::Blob.is_lob());
        assert!(ColumnTag::LongBlob.is_lob());
        assert!(!ColumnTag::VarString.is_lob());
        assert!(!ColumnTag::Json.is_lob());
    }

    #[test]
    fn var_char_family() {
        assert!(ColumnTag::VarChar.is_var_char());
        assert!(ColumnTag::VarString.is_var_char());
        assert!(!ColumnTag::String.is_var_char());
    }

    #[test]
    fn descriptor_flags() {
        let column = ColumnDescriptor::new(ColumnTag::Tiny, Some(1), Collation::BINARY)
            .with_flags(ColumnFlag::NotNull | ColumnFlag::Unsigned);

        assert!(column.flags().contains(ColumnFlag::Unsigned));
        assert!(!column.flags().contains(ColumnFlag::AutoIncrement));
        assert_eq!(Some(1), column.precision());
    }
}
