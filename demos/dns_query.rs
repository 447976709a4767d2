//! Builds a minimal DNS query by hand against the runtime's public API
//! and decodes it back.

use binschema_runtime::bitstream::{BitOrder, BitReader, BitWriter, Endianness};
use binschema_runtime::constructs::array::terminated;
use binschema_runtime::constructs::bitfield::{self, Subfield};
use binschema_runtime::context::EncodeContext;
use binschema_runtime::result::Result;
use binschema_runtime::{Decode, Encode, EncodedSize};

#[derive(Debug, Clone, PartialEq)]
struct Label(Vec<u8>);

impl Encode for Label {
    fn encode(&self, _ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
        out.write_uint8(self.0.len() as u8);
        out.write_bytes(&self.0);
        Ok(())
    }
}
impl Decode for Label {
    fn decode(input: &mut BitReader) -> Result<Self> {
        let len = input.read_uint8()? as usize;
        Ok(Label(input.read_bytes(len)?))
    }
}
impl EncodedSize for Label {
    fn encoded_size(&self, _ctx: &EncodeContext) -> usize {
        1 + self.0.len()
    }
}

const RD: Subfield = Subfield { name: "rd", offset: 8, size: 1 };

fn main() -> anyhow::Result<()> {
    let ctx = EncodeContext::new();
    let mut out = BitWriter::new(BitOrder::MsbFirst);

    // header: id, flags (recursion desired only), one question, zero answers
    out.write_uint16(0xBEEF, Endianness::BigEndian);
    let flags = bitfield::pack(&[(RD, 1)]);
    bitfield::encode(flags, 16, &mut out)?;
    out.write_uint16(1, Endianness::BigEndian); // qdcount
    out.write_uint16(0, Endianness::BigEndian); // ancount
    out.write_uint16(0, Endianness::BigEndian); // nscount
    out.write_uint16(0, Endianness::BigEndian); // arcount

    let labels = vec![Label(b"example".to_vec()), Label(b"com".to_vec())];
    terminated::null::encode(&labels, 0, &ctx, &mut out)?;
    out.write_uint16(1, Endianness::BigEndian); // A record
    out.write_uint16(1, Endianness::BigEndian); // IN class

    let bytes = out.finish();
    dbg!(&bytes);

    let mut input = BitReader::new(&bytes, BitOrder::MsbFirst);
    let id = input.read_uint16(Endianness::BigEndian)?;
    let raw_flags = bitfield::decode(16, &mut input)?;
    let recursion_desired = bitfield::unpack(raw_flags, &RD);
    let qdcount = input.read_uint16(Endianness::BigEndian)?;
    let _ = (input.read_uint16(Endianness::BigEndian)?, input.read_uint16(Endianness::BigEndian)?, input.read_uint16(Endianness::BigEndian)?);
    let decoded_labels: Vec<Label> = terminated::null::decode(0, &mut input)?;

    dbg!(id, recursion_desired, qdcount, &decoded_labels);
    assert_eq!(decoded_labels, labels);

    Ok(())
}
