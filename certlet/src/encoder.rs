//! A bounds-checked write cursor over a caller-supplied buffer.

use crate::error::{check_buffer, Error};
use crate::varint::{encode_var_int, encode_var_uint, var_uint_size};

pub struct Encoder<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> Encoder<'a> {
    pub fn new(buffer: &'a mut [u8], offset: usize) -> Encoder<'a> {
        Encoder { buffer, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn encode_var_uint(&mut self, value: u64) -> Result<usize, Error> {
        self.offset = encode_var_uint(self.buffer, self.offset, value)?;
        Ok(self.offset)
    }

    pub fn encode_var_int(&mut self, value: i64) -> Result<usize, Error> {
        self.offset = encode_var_int(self.buffer, self.offset, value)?;
        Ok(self.offset)
    }

    pub fn encode_byte(&mut self, value: u8) -> Result<usize, Error> {
        check_buffer(self.buffer.len(), self.offset, 1)?;
        self.buffer[self.offset] = value;
        self.offset += 1;
        Ok(self.offset)
    }

    pub fn encode_raw_binary(&mut self, value: &[u8]) -> Result<usize, Error> {
        check_buffer(self.buffer.len(), self.offset, value.len())?;
        self.buffer[self.offset..self.offset + value.len()].copy_from_slice(value);
        self.offset += value.len();
        Ok(self.offset)
    }

    /// Length-prefixed bytes: an unsigned varint length followed by the raw
    /// payload.
    pub fn encode_binary(&mut self, value: &[u8]) -> Result<usize, Error> {
        let total = var_uint_size(value.len() as u64) + value.len();
        check_buffer(self.buffer.len(), self.offset, total)?;

        self.encode_var_uint(value.len() as u64)?;
        self.encode_raw_binary(value)
    }

    pub fn encode_uint_le(&mut self, value: u64, width: usize) -> Result<usize, Error> {
        check_buffer(self.buffer.len(), self.offset, width)?;

        let mut value = value;
        for _ in 0..width {
            self.buffer[self.offset] = value as u8;
            value >>= 8;
            self.offset += 1;
        }

        Ok(self.offset)
    }

    pub fn encode_float_le(&mut self, value: f64, width: usize) -> Result<usize, Error> {
        match width {
            8 => self.encode_uint_le(value.to_bits(), width),
            4 => self.encode_uint_le(u64::from((value as f32).to_bits()), width),
            _ => Err(Error::UnsupportedWidth(width)),
        }
    }
}
