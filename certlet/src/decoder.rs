//! A bounds-checked read cursor over a byte slice.

use crate::error::{check_buffer, Error};
use crate::field::WireId;
use crate::varint::{decode_var_int, decode_var_uint};

pub struct Decoder<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(buffer: &'a [u8], offset: usize) -> Decoder<'a> {
        Decoder { buffer, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    pub fn decode_var_uint(&mut self) -> Result<u64, Error> {
        let (value, next) = decode_var_uint(self.buffer, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    pub fn decode_var_int(&mut self) -> Result<i64, Error> {
        let (value, next) = decode_var_int(self.buffer, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    pub fn decode_byte(&mut self) -> Result<u8, Error> {
        check_buffer(self.buffer.len(), self.offset, 1)?;
        let value = self.buffer[self.offset];
        self.offset += 1;
        Ok(value)
    }

    pub fn decode_raw_binary(&mut self, size: usize) -> Result<Vec<u8>, Error> {
        check_buffer(self.buffer.len(), self.offset, size)?;
        let value = self.buffer[self.offset..self.offset + size].to_vec();
        self.offset += size;
        Ok(value)
    }

    /// Length-prefixed bytes: an unsigned varint length followed by the raw
    /// payload.
    pub fn decode_binary(&mut self) -> Result<Vec<u8>, Error> {
        let size = self.decode_var_uint()?;
        self.decode_raw_binary(size as usize)
    }

    pub fn decode_uint_le(&mut self, width: usize) -> Result<u64, Error> {
        check_buffer(self.buffer.len(), self.offset, width)?;

        let mut value = 0u64;
        for i in 0..width {
            value |= u64::from(self.buffer[self.offset]) << (i * 8);
            self.offset += 1;
        }

        Ok(value)
    }

    pub fn decode_wire_id(&mut self) -> Result<WireId, Error> {
        Ok(WireId::from_value(self.decode_var_uint()?))
    }
}
