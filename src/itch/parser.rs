//! Frame reading and field decoding.
//!
//! `stock_locate` is read out of the first two bytes of the payload (after the
//! 1-byte type tag has already been consumed), and every other field offset is
//! relative to that same payload.

use std::fmt;
use std::io::{self, Read};

use crate::itch::message::{Message, StockLocate};

/// An undecoded message: its type tag and the raw payload that follows it (the
/// 2-byte length prefix and the type byte itself are not included).
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub msg_type: u8,
    pub payload: Vec<u8>,
}

/// Reads length-prefixed ITCH frames off any `Read`.
pub struct FrameReader<R> {
    reader: R,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the next frame, or `Ok(None)` at a clean end of stream.
    pub fn read_frame(&mut self) -> io::Result<Option<RawFrame>> {
        let mut len_buf = [0u8; 2];
        match self.reader.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e),
        }
        let len = u16::from_be_bytes(len_buf) as usize;

        let mut type_buf = [0u8; 1];
        self.reader.read_exact(&mut type_buf)?;

        let mut payload = vec![0u8; len.saturating_sub(1)];
        self.reader.read_exact(&mut payload)?;

        Ok(Some(RawFrame {
            msg_type: type_buf[0],
            payload,
        }))
    }
}

/// A frame whose payload was too short for its declared type to be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub msg_type: u8,
    pub needed: usize,
    pub got: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "message type {:#04x} needs at least {} payload bytes, got {}",
            self.msg_type, self.needed, self.got
        )
    }
}

impl std::error::Error for ParseError {}

/// Decodes a raw frame. Returns `Ok(None)` for message types the matching core
/// has no use for — those are skipped, not an error. Returns `Err` only when a
/// *known* type's payload is shorter than its fixed fields require.
pub fn decode(frame: &RawFrame) -> Result<Option<Message>, ParseError> {
    match frame.msg_type {
        b'R' => decode_stock_directory(frame).map(Some),
        b'A' => decode_add_order(frame).map(Some),
        b'D' => decode_delete(frame).map(Some),
        b'X' => decode_cancel(frame).map(Some),
        b'E' => decode_executed(frame).map(Some),
        b'U' => decode_replace(frame).map(Some),
        _ => Ok(None),
    }
}

fn need(frame: &RawFrame, bytes: usize) -> Result<(), ParseError> {
    if frame.payload.len() < bytes {
        Err(ParseError {
            msg_type: frame.msg_type,
            needed: bytes,
            got: frame.payload.len(),
        })
    } else {
        Ok(())
    }
}

fn stock_locate(payload: &[u8]) -> StockLocate {
    u16::from_be_bytes([payload[0], payload[1]])
}

fn u32_be(payload: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(payload[offset..offset + 4].try_into().unwrap())
}

fn u64_be(payload: &[u8], offset: usize) -> u64 {
    u64::from_be_bytes(payload[offset..offset + 8].try_into().unwrap())
}

fn decode_stock_directory(frame: &RawFrame) -> Result<Message, ParseError> {
    need(frame, 29)?;
    let payload = &frame.payload;
    let symbol = String::from_utf8_lossy(&payload[10..18]).trim().to_string();
    Ok(Message::StockDirectory {
        stock_locate: stock_locate(payload),
        symbol,
        financial_status_indicator: payload[19],
        issue_classification: payload[25],
        authenticity: payload[28],
    })
}

fn decode_add_order(frame: &RawFrame) -> Result<Message, ParseError> {
    need(frame, 35)?;
    let payload = &frame.payload;
    let side = match payload[18] {
        b'B' => crate::order::Side::Buy,
        _ => crate::order::Side::Sell,
    };
    Ok(Message::AddOrder {
        stock_locate: stock_locate(payload),
        order_id: u64_be(payload, 10) as i64,
        side,
        shares: u32_be(payload, 19),
        price: u32_be(payload, 31) as f64 / 10_000.0,
    })
}

fn decode_delete(frame: &RawFrame) -> Result<Message, ParseError> {
    need(frame, 18)?;
    let payload = &frame.payload;
    Ok(Message::Delete {
        stock_locate: stock_locate(payload),
        order_id: u64_be(payload, 10) as i64,
    })
}

fn decode_cancel(frame: &RawFrame) -> Result<Message, ParseError> {
    need(frame, 22)?;
    let payload = &frame.payload;
    Ok(Message::Cancel {
        stock_locate: stock_locate(payload),
        order_id: u64_be(payload, 10) as i64,
        cancelled_shares: u32_be(payload, 18),
    })
}

fn decode_executed(frame: &RawFrame) -> Result<Message, ParseError> {
    need(frame, 22)?;
    let payload = &frame.payload;
    Ok(Message::Executed {
        stock_locate: stock_locate(payload),
        order_id: u64_be(payload, 10) as i64,
        executed_shares: u32_be(payload, 18),
    })
}

fn decode_replace(frame: &RawFrame) -> Result<Message, ParseError> {
    need(frame, 34)?;
    let payload = &frame.payload;
    Ok(Message::Replace {
        stock_locate: stock_locate(payload),
        old_order_id: u64_be(payload, 10) as i64,
        new_order_id: u64_be(payload, 18) as i64,
        shares: u32_be(payload, 26),
        price: u32_be(payload, 30) as f64 / 10_000.0,
    })
}
