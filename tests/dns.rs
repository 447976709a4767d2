//! Hand-written DNS message codec exercising the runtime end to end:
//! a bitfield-packed flags word, a back-reference-compressed domain
//! name, a length-prefixed question array, and the asymmetric
//! aligned/unaligned byte rule all round-tripping together. There is
//! no schema or generator backing this file — it plays the role the
//! generated code would, the way the reference implementation's own
//! `dns_message.rs` benchmark does.

use assert_matches::assert_matches;
use binschema_runtime::bitstream::{BitOrder, BitReader, BitWriter, Endianness};
use binschema_runtime::constructs::array::{terminated, LengthEncoding};
use binschema_runtime::constructs::backref::{self, BackrefFormat};
use binschema_runtime::constructs::bitfield::{self, Subfield};
use binschema_runtime::context::EncodeContext;
use binschema_runtime::result::Result;
use binschema_runtime::{BigEndian, Decode, Encode, EncodedSize};

const QR: Subfield = Subfield { name: "qr", offset: 15, size: 1 };
const OPCODE: Subfield = Subfield { name: "opcode", offset: 11, size: 4 };
const AA: Subfield = Subfield { name: "aa", offset: 10, size: 1 };
const TC: Subfield = Subfield { name: "tc", offset: 9, size: 1 };
const RD: Subfield = Subfield { name: "rd", offset: 8, size: 1 };
const RA: Subfield = Subfield { name: "ra", offset: 7, size: 1 };
const RCODE: Subfield = Subfield { name: "rcode", offset: 0, size: 4 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DnsFlags {
    qr: u8,
    opcode: u8,
    aa: u8,
    tc: u8,
    rd: u8,
    ra: u8,
    rcode: u8,
}

impl Encode for DnsFlags {
    fn encode(&self, _ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
        let raw = bitfield::pack(&[
            (QR, self.qr as u64),
            (OPCODE, self.opcode as u64),
            (AA, self.aa as u64),
            (TC, self.tc as u64),
            (RD, self.rd as u64),
            (RA, self.ra as u64),
            (RCODE, self.rcode as u64),
        ]);
        bitfield::encode(raw, 16, out)
    }
}

impl Decode for DnsFlags {
    fn decode(input: &mut BitReader) -> Result<Self> {
        let raw = bitfield::decode(16, input)?;
        Ok(DnsFlags {
            qr: bitfield::unpack(raw, &QR) as u8,
            opcode: bitfield::unpack(raw, &OPCODE) as u8,
            aa: bitfield::unpack(raw, &AA) as u8,
            tc: bitfield::unpack(raw, &TC) as u8,
            rd: bitfield::unpack(raw, &RD) as u8,
            ra: bitfield::unpack(raw, &RA) as u8,
            rcode: bitfield::unpack(raw, &RCODE) as u8,
        })
    }
}

impl EncodedSize for DnsFlags {
    fn encoded_size(&self, _ctx: &EncodeContext) -> usize {
        2
    }
}

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

/// A domain name: a null-terminated run of labels, any of which may be
/// replaced by a compression pointer to an identical earlier name.
#[derive(Debug, Clone, PartialEq)]
struct Domain(Vec<u8>);

impl Domain {
    fn labels(&self) -> Vec<Label> {
        self.0.split(|&b| b == b'.').map(|part| Label(part.to_vec())).collect()
    }

    fn from_labels(labels: Vec<Label>) -> Self {
        let joined = labels.into_iter().map(|l| l.0).collect::<Vec<_>>().join(&b'.');
        Domain(joined)
    }
}

// `Domain`'s own `Encode`/`Decode` is always the inline, uncompressed
// form (a null-terminated label run). Compression is layered on top by
// calling `backref::encode`/`backref::decode` directly wherever a
// domain name is used, the way the reference implementation's
// `LabelPointer` wraps `Label` rather than `Label` wrapping itself.
impl Encode for Domain {
    fn encode(&self, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
        terminated::null::encode(&self.labels(), 0, ctx, out)
    }
}

impl Decode for Domain {
    fn decode(input: &mut BitReader) -> Result<Self> {
        let labels: Vec<Label> = terminated::null::decode(0, input)?;
        Ok(Domain::from_labels(labels))
    }
}

impl EncodedSize for Domain {
    fn encoded_size(&self, _ctx: &EncodeContext) -> usize {
        self.labels().iter().map(|l| l.encoded_size(&EncodeContext::new())).sum::<usize>() + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Question {
    name: Domain,
    qtype: u16,
    qclass: u16,
}

impl Encode for Question {
    fn encode(&self, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
        backref::encode(&self.name, &BackrefFormat::DNS, ctx, out)?;
        BigEndian(self.qtype).encode(ctx, out)?;
        BigEndian(self.qclass).encode(ctx, out)
    }
}

impl Decode for Question {
    fn decode(input: &mut BitReader) -> Result<Self> {
        let name: Domain = backref::decode(input, &BackrefFormat::DNS)?;
        let qtype = BigEndian::<u16>::decode(input)?.0;
        let qclass = BigEndian::<u16>::decode(input)?.0;
        Ok(Question { name, qtype, qclass })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DnsMessage {
    id: u16,
    flags: DnsFlags,
    questions: Vec<Question>,
}

impl Encode for DnsMessage {
    fn encode(&self, ctx: &EncodeContext, out: &mut BitWriter) -> Result<()> {
        BigEndian(self.id).encode(ctx, out)?;
        self.flags.encode(ctx, out)?;
        out.write_uint16(self.questions.len() as u16, Endianness::BigEndian);
        out.write_uint16(0, Endianness::BigEndian); // ancount
        out.write_uint16(0, Endianness::BigEndian); // nscount
        out.write_uint16(0, Endianness::BigEndian); // arcount
        for question in &self.questions {
            question.encode(ctx, out)?;
        }
        Ok(())
    }
}

impl Decode for DnsMessage {
    fn decode(input: &mut BitReader) -> Result<Self> {
        let id = BigEndian::<u16>::decode(input)?.0;
        let flags = DnsFlags::decode(input)?;
        let qdcount = input.read_uint16(Endianness::BigEndian)?;
        let _ancount = input.read_uint16(Endianness::BigEndian)?;
        let _nscount = input.read_uint16(Endianness::BigEndian)?;
        let _arcount = input.read_uint16(Endianness::BigEndian)?;
        let questions = (0..qdcount).map(|_| Question::decode(input)).collect::<Result<Vec<_>>>()?;
        Ok(DnsMessage { id, flags, questions })
    }
}

fn sample_message() -> DnsMessage {
    DnsMessage {
        id: 0x1234,
        flags: DnsFlags { qr: 0, opcode: 0, aa: 0, tc: 0, rd: 1, ra: 0, rcode: 0 },
        questions: vec![Question {
            name: Domain(b"example.com".to_vec()),
            qtype: 1,
            qclass: 1,
        }],
    }
}

#[test]
fn dns_message_roundtrip() -> Result<()> {
    let mut ctx = EncodeContext::new();
    ctx.ensure_compression_dict();
    let mut out = BitWriter::new(BitOrder::MsbFirst);

    let message = sample_message();
    message.encode(&ctx, &mut out)?;
    let bytes = out.finish();

    // Header is 12 bytes: 2 id, 2 flags, 4x2 counts.
    assert_eq!(&bytes[0..2], &[0x12, 0x34]);
    assert_eq!(bytes[2] & 0x01, 1); // rd bit set

    let mut input = BitReader::new(&bytes, BitOrder::MsbFirst);
    let decoded = DnsMessage::decode(&mut input)?;
    assert_eq!(decoded, message);
    Ok(())
}

#[test]
fn repeated_domain_in_two_questions_compresses_the_second() -> Result<()> {
    let mut ctx = EncodeContext::new();
    ctx.ensure_compression_dict();
    let mut out = BitWriter::new(BitOrder::MsbFirst);

    let message = DnsMessage {
        id: 1,
        flags: DnsFlags { qr: 0, opcode: 0, aa: 0, tc: 0, rd: 0, ra: 0, rcode: 0 },
        questions: vec![
            Question { name: Domain(b"repeat.test".to_vec()), qtype: 1, qclass: 1 },
            Question { name: Domain(b"repeat.test".to_vec()), qtype: 28, qclass: 1 },
        ],
    };
    message.encode(&ctx, &mut out)?;
    let bytes = out.finish();

    let mut input = BitReader::new(&bytes, BitOrder::MsbFirst);
    let decoded = DnsMessage::decode(&mut input)?;
    assert_eq!(decoded, message);

    // the second question's name should have compressed to a 2-byte pointer,
    // so the full message must be shorter than two independent inline names.
    let inline_name_len = 1 + "repeat".len() + 1 + "test".len() + 1; // labels + terminator
    let naive_upper_bound = 12 + 2 * (inline_name_len + 4);
    assert!(bytes.len() < naive_upper_bound);
    Ok(())
}

#[test]
fn malformed_self_pointing_backref_fails_fast_instead_of_looping() {
    let bytes = vec![0xC0, 0x00];
    let mut input = BitReader::new(&bytes, BitOrder::MsbFirst);
    let result: Result<Domain> = backref::decode(&mut input, &BackrefFormat::DNS);
    assert_matches!(result, Err(_));
}
