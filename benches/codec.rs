use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keyval::{
    from_slice, to_string, to_string_with_options, Decoder, DecoderOptions, EncoderOptions, Entry,
    Step,
};

fn sample_entries(sections: usize, keys: usize) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(sections * keys);
    for s in 0..sections {
        let comment = format!("settings for service {}", s);
        for k in 0..keys {
            entries.push(
                Entry::new(
                    [format!("service{}", s), "http".to_string(), format!("key{}", k)],
                    format!("value #{} with some text", k),
                )
                .with_comment(comment.clone()),
            );
        }
    }
    entries
}

fn decode_streaming(input: &[u8], buffer_size: usize) -> usize {
    let mut decoder =
        Decoder::with_options(input, DecoderOptions::new().with_buffer_size(buffer_size));
    let mut count = 0;
    loop {
        match decoder.next_entry().unwrap() {
            Step::Entry(_) => count += 1,
            Step::End { last, .. } => return count + usize::from(last.is_some()),
            Step::Pending => {}
        }
    }
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for (sections, keys) in [(1, 10), (10, 100), (100, 100)] {
        let entries = sample_entries(sections, keys);
        group.throughput(Throughput::Elements(entries.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("default", entries.len()),
            &entries,
            |b, entries| b.iter(|| to_string(black_box(entries))),
        );

        let options = EncoderOptions::new().with_max_section_depth(2);
        group.bench_with_input(
            BenchmarkId::new("section_depth_2", entries.len()),
            &entries,
            |b, entries| b.iter(|| to_string_with_options(black_box(entries), options.clone())),
        );
    }

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let text = to_string(&sample_entries(100, 100)).unwrap();
    let input = text.as_bytes();
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("from_slice", |b| b.iter(|| from_slice(black_box(input))));

    for buffer_size in [64, 4096, 1 << 18] {
        group.bench_with_input(
            BenchmarkId::new("streaming", buffer_size),
            &buffer_size,
            |b, &size| b.iter(|| decode_streaming(black_box(input), size)),
        );
    }

    group.finish();
}

fn benchmark_escaping(c: &mut Criterion) {
    let plain: Vec<Entry> = (0..1000)
        .map(|i| Entry::new(["k".to_string(), i.to_string()], "plain value"))
        .collect();
    let escaped: Vec<Entry> = (0..1000)
        .map(|i| Entry::new(["k.#".to_string(), i.to_string()], " a#b\\c\n "))
        .collect();

    c.bench_function("encode_plain_values", |b| {
        b.iter(|| to_string(black_box(&plain)))
    });
    c.bench_function("encode_escaped_values", |b| {
        b.iter(|| to_string(black_box(&escaped)))
    });

    let text = to_string(&escaped).unwrap();
    c.bench_function("decode_escaped_values", |b| {
        b.iter(|| from_slice(black_box(text.as_bytes())))
    });
}

criterion_group!(benches, benchmark_encode, benchmark_decode, benchmark_escaping);
criterion_main!(benches);
