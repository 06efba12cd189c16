use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::io::Cursor;
use xmpscan::locate_fragment;

const PACKET: &str = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:xmp="http://ns.adobe.com/xap/1.0/">
  <rdf:Description rdf:about="" xmp:Rating="3"/>
</rdf:RDF>
</x:xmpmeta>"#;

// Synthetic image: packet near the start, followed by a large binary body
fn image_with_packet(body_len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1];
    data.extend_from_slice(PACKET.as_bytes());
    data.extend((0..body_len).map(|i| (i % 251) as u8));
    data
}

// Worst case: no packet, every byte is scanned
fn image_without_packet(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

fn bench_locate_early_packet(c: &mut Criterion) {
    let data = image_with_packet(4 * 1024 * 1024);
    c.bench_function("locate_early_packet", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(&data));
            locate_fragment(&mut cursor).unwrap()
        });
    });
}

fn bench_locate_missing_packet(c: &mut Criterion) {
    let data = image_without_packet(4 * 1024 * 1024);
    c.bench_function("locate_missing_packet", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(&data));
            locate_fragment(&mut cursor).unwrap()
        });
    });
}

criterion_group!(benches, bench_locate_early_packet, bench_locate_missing_packet);
criterion_main!(benches);
