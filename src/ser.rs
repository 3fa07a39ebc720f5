//! Serde-driven traversal of values into query items.

use std::borrow::Cow;

use serde::ser;

use crate::config::Config;
use crate::date;
use crate::encoder::QueryItem;
use crate::error::{Error, Result};
use crate::style;

/// Depth-first visitor over a `Serialize` value.
///
/// Struct fields and map keys extend the coding path on the way down;
/// sequence elements reuse the path of the sequence itself, so an array
/// of scalars under `id` yields one item per element, all resolved
/// against the path `["id"]`. Each scalar leaf is converted to its
/// canonical string and handed to the style resolver.
///
/// One of these is created per `encode` call, borrowing the encoder's
/// item list; the traversal state never outlives the call.
pub(crate) struct ValueSerializer<'a> {
    items: &'a mut Vec<QueryItem>,
    config: &'a Config,
    path: Vec<Cow<'static, str>>,
}

impl<'a> ValueSerializer<'a> {
    pub(crate) fn new(items: &'a mut Vec<QueryItem>, config: &'a Config) -> Self {
        Self {
            items,
            config,
            path: Vec::with_capacity(4),
        }
    }

    fn push_key(&mut self, key: Cow<'static, str>) {
        self.path.push(key);
    }

    fn pop_key(&mut self) -> Result<()> {
        if self.path.pop().is_none() {
            return Err(Error::Custom("internal error: no key to pop".to_owned()));
        }
        Ok(())
    }

    fn append_scalar(&mut self, value: &str) {
        style::append(self.items, &self.path, value, self.config);
    }
}

macro_rules! serialize_itoa {
    ($($ty:ty => $meth:ident,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                let mut buffer = itoa::Buffer::new();
                self.append_scalar(buffer.format(v));
                Ok(())
            }
        )*
    };
}

macro_rules! serialize_ryu {
    ($($ty:ty => $meth:ident,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                let mut buffer = ryu::Buffer::new();
                self.append_scalar(buffer.format(v));
                Ok(())
            }
        )*
    };
}

impl<'s, 'a> ser::Serializer for &'s mut ValueSerializer<'a> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = SeqSerializer<'s, 'a>;
    type SerializeTuple = SeqSerializer<'s, 'a>;
    type SerializeTupleStruct = SeqSerializer<'s, 'a>;
    type SerializeTupleVariant = SeqSerializer<'s, 'a>;
    type SerializeMap = MapSerializer<'s, 'a>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    serialize_itoa! {
        u8  => serialize_u8,
        u16 => serialize_u16,
        u32 => serialize_u32,
        u64 => serialize_u64,
        i8  => serialize_i8,
        i16 => serialize_i16,
        i32 => serialize_i32,
        i64 => serialize_i64,
    }
    serialize_ryu! {
        f32 => serialize_f32,
        f64 => serialize_f64,
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.append_scalar(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        let mut b = [0; 4];
        self.append_scalar(v.encode_utf8(&mut b));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.append_scalar(v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        self.append_scalar(&String::from_utf8_lossy(v));
        Ok(())
    }

    // Absent values contribute no items, at any depth.
    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + ser::Serialize>(self, value: &T) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.append_scalar(variant);
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + ser::Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        if name == date::TOKEN {
            let millis = date::extract_millis(value)?;
            let formatted = self.config.date_strategy.format_millis(millis)?;
            self.append_scalar(&formatted);
            return Ok(());
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + ser::Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        self.push_key(Cow::Borrowed(variant));
        value.serialize(&mut *self)?;
        self.pop_key()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqSerializer { ser: self })
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(SeqSerializer { ser: self })
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(SeqSerializer { ser: self })
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.push_key(Cow::Borrowed(variant));
        Ok(SeqSerializer { ser: self })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer { ser: self })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.push_key(Cow::Borrowed(variant));
        Ok(self)
    }
}

impl ser::SerializeStruct for &mut ValueSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.push_key(Cow::Borrowed(key));
        value.serialize(&mut **self)?;
        self.pop_key()
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for &mut ValueSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        self.push_key(Cow::Borrowed(key));
        value.serialize(&mut **self)?;
        self.pop_key()
    }

    fn end(self) -> Result<Self::Ok> {
        // pop the variant key
        self.pop_key()
    }
}

#[doc(hidden)]
pub struct SeqSerializer<'s, 'a> {
    ser: &'s mut ValueSerializer<'a>,
}

impl ser::SerializeSeq for SeqSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        // Elements share the coding path of the sequence itself; the
        // style rules never see positional indices.
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

impl ser::SerializeTuple for SeqSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for SeqSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for SeqSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        // pop the variant key
        self.ser.pop_key()
    }
}

#[doc(hidden)]
pub struct MapSerializer<'s, 'a> {
    ser: &'s mut ValueSerializer<'a>,
}

impl ser::SerializeMap for MapSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        key.serialize(KeySerializer { ser: &mut *self.ser })
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ser::Serialize + ?Sized,
    {
        value.serialize(&mut *self.ser)?;
        self.ser.pop_key()
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(())
    }
}

macro_rules! serialize_key_itoa {
    ($($ty:ty => $meth:ident,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                let mut buffer = itoa::Buffer::new();
                self.ser.push_key(Cow::Owned(buffer.format(v).to_owned()));
                Ok(())
            }
        )*
    };
}

macro_rules! serialize_key_ryu {
    ($($ty:ty => $meth:ident,)*) => {
        $(
            fn $meth(self, v: $ty) -> Result<Self::Ok> {
                let mut buffer = ryu::Buffer::new();
                self.ser.push_key(Cow::Owned(buffer.format(v).to_owned()));
                Ok(())
            }
        )*
    };
}

/// Map keys become coding-path segments; only scalar keys make sense.
struct KeySerializer<'s, 'a> {
    ser: &'s mut ValueSerializer<'a>,
}

impl ser::Serializer for KeySerializer<'_, '_> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = ser::Impossible<Self::Ok, Error>;
    type SerializeTuple = ser::Impossible<Self::Ok, Error>;
    type SerializeTupleStruct = ser::Impossible<Self::Ok, Error>;
    type SerializeTupleVariant = ser::Impossible<Self::Ok, Error>;
    type SerializeMap = ser::Impossible<Self::Ok, Error>;
    type SerializeStruct = ser::Impossible<Self::Ok, Error>;
    type SerializeStructVariant = ser::Impossible<Self::Ok, Error>;

    serialize_key_itoa! {
        u8  => serialize_u8,
        u16 => serialize_u16,
        u32 => serialize_u32,
        u64 => serialize_u64,
        i8  => serialize_i8,
        i16 => serialize_i16,
        i32 => serialize_i32,
        i64 => serialize_i64,
    }
    serialize_key_ryu! {
        f32 => serialize_f32,
        f64 => serialize_f64,
    }

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.ser
            .push_key(Cow::Borrowed(if v { "true" } else { "false" }));
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.ser.push_key(Cow::Owned(v.to_string()));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.ser.push_key(Cow::Owned(v.to_owned()));
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        self.ser
            .push_key(Cow::Owned(String::from_utf8_lossy(v).into_owned()));
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.ser.push_key(Cow::Borrowed(variant));
        Ok(())
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Err(Error::Unsupported)
    }

    fn serialize_some<T: ?Sized + ser::Serialize>(self, _value: &T) -> Result<Self::Ok> {
        Err(Error::Unsupported)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Err(Error::Unsupported)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Err(Error::Unsupported)
    }

    fn serialize_newtype_struct<T: ?Sized + ser::Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + ser::Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok> {
        Err(Error::Unsupported)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::Unsupported)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::Unsupported)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::Unsupported)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::Unsupported)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::Unsupported)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::Unsupported)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::Unsupported)
    }
}
