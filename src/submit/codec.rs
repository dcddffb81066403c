use std::marker::PhantomData;

use bytes::{Buf, BytesMut};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::codec::{Decoder, Encoder};

use super::error::SubmitError;

/// Newline-delimited JSON: one serialized `T` per line.
#[derive(Debug)]
pub struct JsonLinesCodec<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> JsonLinesCodec<T> {
    pub fn new() -> Self {
        Self { _item: PhantomData }
    }
}

impl<T> Default for JsonLinesCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Encoder<T> for JsonLinesCodec<T> {
    type Error = SubmitError;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let json = serde_json::to_vec(&item)?;
        dst.reserve(json.len() + 1);
        dst.extend_from_slice(&json);
        dst.extend_from_slice(b"\n");
        Ok(())
    }
}

impl<T: DeserializeOwned> Decoder for JsonLinesCodec<T> {
    type Item = T;
    type Error = SubmitError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<T>, Self::Error> {
        loop {
            let Some(newline) = src.iter().position(|b| *b == b'\n') else {
                return Ok(None);
            };
            let line = src.split_to(newline + 1);
            let line = &line[..newline];
            // Blank lines are skipped, not treated as records.
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            return Ok(Some(serde_json::from_slice(line)?));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<T>, Self::Error> {
        if let Some(item) = self.decode(src)? {
            return Ok(Some(item));
        }
        if src.iter().all(u8::is_ascii_whitespace) {
            src.advance(src.len());
            return Ok(None);
        }
        let rest = src.split_to(src.len());
        Ok(Some(serde_json::from_slice(&rest)?))
    }
}
