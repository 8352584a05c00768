use criterion::{Criterion, black_box, criterion_group, criterion_main};
use needledrop_core::parser::Collator;
use needledrop_core::types::VideoRecord;

fn bench_collate(c: &mut Criterion) {
    let collator = Collator::default().unwrap();

    let videos = vec![
        VideoRecord::parse(
            "1",
            "2012-10-22T14:27:09Z",
            "Kendrick Lamar- good kid, m.A.A.d. city ALBUM REVIEW",
            "KENDRICK LAMAR- GOOD KID, M.A.A.D. CITY / 2012 / INTERSCOPE / WEST COAST HIP HOP, CONSCIOUS HIP HOP\n\n9/10",
        )
        .unwrap(),
        VideoRecord::parse(
            "2",
            "2010-03-03T03:25:15Z",
            "Gorillaz- Plastic Beach Review",
            "7/10 http://bit.ly/9k9Chc",
        )
        .unwrap(),
        VideoRecord::parse(
            "3",
            "2013-06-05T14:56:57Z",
            "CX KiDTRONiK: KRAK ATTACK 2: THE BALLAD OF ELLI SKIFF ALBUM REVIEW",
            "CX KIDTRONIK - KRAK ATTACK 2 / 2013 / STONES THROW / EXPERIMENTAL HIP HOP\n\n6/10",
        )
        .unwrap(),
        VideoRecord::parse(
            "4",
            "2022-05-17T04:59:34Z",
            "Weekly Track Roundup: 5/17",
            "no score here",
        )
        .unwrap(),
        VideoRecord::parse(
            "5",
            "2020-09-29T19:43:33Z",
            "Machine Gun Kelly's Tickets to My Downfall: NOT GOOD",
            "NOT GOOD/10",
        )
        .unwrap(),
    ];

    c.bench_function("process_one_review", |b| {
        b.iter(|| collator.process_one(black_box(&videos[0])).unwrap());
    });

    c.bench_function("collect_batch_5", |b| {
        b.iter(|| collator.collect(black_box(&videos)));
    });
}

criterion_group!(benches, bench_collate);
criterion_main!(benches);
