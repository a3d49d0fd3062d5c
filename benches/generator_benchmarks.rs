use criterion::{Criterion, black_box, criterion_group, criterion_main};

use jpdrills::generator::{GeneratorOptions, SentenceGenerator};
use jpdrills::lexicon::import::import_text;
use jpdrills::lexicon::{Category, Lexicon, LexiconEntry};
use jpdrills::session::grade::Grade;
use jpdrills::session::queue::PracticeQueue;

fn large_lexicon(per_category: usize) -> Lexicon {
    let mut lexicon = Lexicon::seed();
    for i in 0..per_category {
        lexicon.push(LexiconEntry::new(format!("友{i}"), Category::Person).with_translation("friend"));
        lexicon.push(LexiconEntry::new(format!("店{i}"), Category::Place).with_translation("shop"));
        lexicon.push(LexiconEntry::new(format!("物{i}"), Category::Object).with_translation("thing"));
    }
    lexicon
}

fn make_deck(rows: usize) -> String {
    let terms = ["先生", "学校", "本", "行く", "食べる", "駅", "りんご", "勉強する"];
    let mut deck = String::from("note_id,term,reading,translation,status,last_studied_at,tags\n");
    for i in 0..rows {
        let status = if i % 5 == 0 { "new" } else { "review" };
        deck.push_str(&format!("{i},{},,,{status},,\n", terms[i % terms.len()]));
    }
    deck
}

fn bench_generate(c: &mut Criterion) {
    let lexicon = large_lexicon(500);

    c.bench_function("generate 100 cards (1500-entry lexicon)", |b| {
        let mut generator = SentenceGenerator::seeded(GeneratorOptions::default(), 1);
        b.iter(|| generator.generate(black_box(&lexicon), 100))
    });

    let seed = Lexicon::seed();
    c.bench_function("generate 100 cards (seed lexicon)", |b| {
        let mut generator = SentenceGenerator::seeded(GeneratorOptions::default(), 1);
        b.iter(|| generator.generate(black_box(&seed), 100))
    });
}

fn bench_import(c: &mut Criterion) {
    let deck = make_deck(2000);

    c.bench_function("import 2000-row deck", |b| {
        b.iter(|| import_text(black_box(&deck)))
    });
}

fn bench_queue(c: &mut Criterion) {
    let mut generator = SentenceGenerator::seeded(GeneratorOptions::default(), 2);
    let cards = generator.generate(&Lexicon::seed(), 100);

    c.bench_function("grade 100 cards with requeues", |b| {
        b.iter(|| {
            let mut queue = PracticeQueue::with_cards(cards.clone());
            for grade in Grade::ALL.iter().cycle().take(100) {
                queue.grade(black_box(*grade));
            }
            queue
        })
    });
}

criterion_group!(benches, bench_generate, bench_import, bench_queue);
criterion_main!(benches);
