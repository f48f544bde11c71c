//! Built-in catalog: a Rust quick-reference.
//!
//! This is the bundled content shown when no catalog file is given on the
//! command line. Pure data; the ids below are the anchor targets the
//! sidebar and the scroll spy work with.

use crate::catalog::{Catalog, CodeExample, Section, Subsection};

fn example(language: &str, code: &str) -> CodeExample {
    CodeExample {
        title: None,
        language: language.to_string(),
        code: code.trim_matches('\n').to_string(),
    }
}

fn titled_example(title: &str, language: &str, code: &str) -> CodeExample {
    CodeExample {
        title: Some(title.to_string()),
        language: language.to_string(),
        code: code.trim_matches('\n').to_string(),
    }
}

struct SubsectionBuilder(Subsection);

fn subsection(id: &str, title: &str, description: &str) -> SubsectionBuilder {
    SubsectionBuilder(Subsection {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        examples: Vec::new(),
        tips: Vec::new(),
        warnings: Vec::new(),
    })
}

impl SubsectionBuilder {
    fn example(mut self, example: CodeExample) -> Self {
        self.0.examples.push(example);
        self
    }

    fn tip(mut self, tip: &str) -> Self {
        self.0.tips.push(tip.to_string());
        self
    }

    fn warning(mut self, warning: &str) -> Self {
        self.0.warnings.push(warning.to_string());
        self
    }

    fn build(self) -> Subsection {
        self.0
    }
}

fn section(id: &str, title: &str, description: &str, subsections: Vec<Subsection>) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        subsections,
    }
}

/// The bundled Rust quick-reference catalog
pub fn builtin() -> Catalog {
    Catalog {
        sections: vec![
            fundamentals(),
            ownership(),
            types_and_traits(),
            pattern_matching(),
            error_handling(),
            collections(),
            iterators(),
            strings(),
            concurrency(),
            modules_and_testing(),
        ],
    }
}

fn fundamentals() -> Section {
    section(
        "fundamentals",
        "Fundamentals",
        "Bindings, functions and control flow",
        vec![
            subsection(
                "variables",
                "Variables & Mutability",
                "Bindings are immutable unless marked mut; shadowing rebinds a name",
            )
            .example(example(
                "rust",
                r#"
let x = 5;
let mut count = 0;
count += 1;

// Shadowing: same name, new binding (type may change)
let spaces = "   ";
let spaces = spaces.len();

const MAX_RETRIES: u32 = 3;
"#,
            ))
            .tip("Prefer shadowing over mut for transform-then-use pipelines")
            .build(),
            subsection(
                "functions",
                "Functions & Expressions",
                "The last expression of a block is its value; no return keyword needed",
            )
            .example(example(
                "rust",
                r#"
fn add(a: i32, b: i32) -> i32 {
    a + b // no semicolon: this is the return value
}

fn classify(n: i32) -> &'static str {
    if n < 0 { "negative" } else { "non-negative" }
}

let doubled = |x: i32| x * 2; // closure
"#,
            ))
            .warning("Adding a semicolon to the tail expression changes the type to ()")
            .build(),
            subsection(
                "control-flow",
                "Control Flow",
                "if/while/loop are expressions; loops can break with a value",
            )
            .example(example(
                "rust",
                r#"
let label = if score > 90 { "great" } else { "ok" };

let mut attempts = 0;
let port = loop {
    attempts += 1;
    if let Some(p) = try_bind() {
        break p; // loop yields a value
    }
};

for i in (0..10).step_by(2) {
    println!("{i}");
}
"#,
            ))
            .build(),
        ],
    )
}

fn ownership() -> Section {
    section(
        "ownership",
        "Ownership & Borrowing",
        "Move semantics, references and lifetimes",
        vec![
            subsection(
                "moves",
                "Moves & Clones",
                "Assignment moves non-Copy values; the old binding becomes unusable",
            )
            .example(example(
                "rust",
                r#"
let s1 = String::from("hello");
let s2 = s1;          // s1 moved, no longer usable
let s3 = s2.clone();  // deep copy, both usable

let n1 = 5;
let n2 = n1;          // i32 is Copy: both usable
"#,
            ))
            .tip("Derive Clone freely; derive Copy only for small plain-data types")
            .build(),
            subsection(
                "borrowing",
                "References",
                "Any number of shared borrows, or exactly one mutable borrow",
            )
            .example(example(
                "rust",
                r#"
fn len(s: &String) -> usize { s.len() }     // shared borrow
fn push(s: &mut String) { s.push('!'); }    // exclusive borrow

let mut s = String::from("hi");
let r1 = &s;
let r2 = &s;          // fine: many shared borrows
println!("{r1} {r2}");
let m = &mut s;       // fine: shared borrows ended above
m.push('!');
"#,
            ))
            .warning("A mutable borrow cannot coexist with any other borrow of the same value")
            .build(),
            subsection(
                "lifetimes",
                "Lifetimes",
                "Annotations relate the lifetimes of references; they never extend them",
            )
            .example(example(
                "rust",
                r#"
fn longest<'a>(x: &'a str, y: &'a str) -> &'a str {
    if x.len() > y.len() { x } else { y }
}

struct Excerpt<'a> {
    part: &'a str, // the struct cannot outlive the borrowed text
}
"#,
            ))
            .tip("Most signatures need no annotations thanks to lifetime elision")
            .build(),
            subsection(
                "slices",
                "Slices",
                "Borrowed views into contiguous data",
            )
            .example(example(
                "rust",
                r#"
let s = String::from("hello world");
let word: &str = &s[0..5];

let numbers = [1, 2, 3, 4, 5];
let middle: &[i32] = &numbers[1..4];

fn first_word(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}
"#,
            ))
            .build(),
        ],
    )
}

fn types_and_traits() -> Section {
    section(
        "traits",
        "Structs, Enums & Traits",
        "Data modeling and shared behavior",
        vec![
            subsection(
                "structs",
                "Structs",
                "Named fields, tuple structs, and impl blocks for methods",
            )
            .example(example(
                "rust",
                r#"
struct Point { x: f64, y: f64 }
struct Meters(f64); // newtype

impl Point {
    fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}
"#,
            ))
            .build(),
            subsection(
                "enums",
                "Enums",
                "Variants may carry data; model states that are mutually exclusive",
            )
            .example(example(
                "rust",
                r#"
enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
    Point,
}

impl Shape {
    fn area(&self) -> f64 {
        match self {
            Shape::Circle { radius } => std::f64::consts::PI * radius * radius,
            Shape::Rectangle { width, height } => width * height,
            Shape::Point => 0.0,
        }
    }
}
"#,
            ))
            .tip("Make invalid states unrepresentable: an enum beats a struct of bools")
            .build(),
            subsection(
                "trait-basics",
                "Traits & Generics",
                "Traits define shared behavior; generics accept any implementor",
            )
            .example(example(
                "rust",
                r#"
trait Describe {
    fn describe(&self) -> String;

    fn shout(&self) -> String {
        self.describe().to_uppercase() // default method
    }
}

fn announce<T: Describe>(item: &T) {
    println!("{}", item.describe());
}

// impl Trait: simpler spelling for arguments and returns
fn make_describer() -> impl Describe { /* ... */ }
"#,
            ))
            .build(),
            subsection(
                "derive",
                "Common Derives",
                "Let the compiler write the boilerplate",
            )
            .example(example(
                "rust",
                r#"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
struct Config {
    name: String,
    retries: u32,
}

println!("{:?}", Config::default());
"#,
            ))
            .tip("Start with Debug and Clone on most types; add Eq/Hash when keys demand it")
            .build(),
        ],
    )
}

fn pattern_matching() -> Section {
    section(
        "patterns",
        "Pattern Matching",
        "match, if let, and destructuring",
        vec![
            subsection(
                "match",
                "match",
                "Exhaustive by construction; the compiler checks every variant is handled",
            )
            .example(example(
                "rust",
                r#"
match message {
    Message::Quit => cleanup(),
    Message::Move { x, y } => position = (x, y),
    Message::Write(text) if text.is_empty() => {} // guard
    Message::Write(text) => buffer.push_str(&text),
}

let description = match number {
    0 => "zero",
    1..=9 => "single digit",
    _ => "large",
};
"#,
            ))
            .build(),
            subsection(
                "if-let",
                "if let / let else",
                "Single-pattern matches without the full match ceremony",
            )
            .example(example(
                "rust",
                r#"
if let Some(name) = config.name {
    greet(&name);
}

let Some(first) = items.first() else {
    return Err(Error::Empty);
};

while let Some(task) = queue.pop() {
    run(task);
}
"#,
            ))
            .tip("let-else keeps the happy path unindented")
            .build(),
            subsection(
                "destructuring",
                "Destructuring",
                "Patterns work in let, function arguments and for loops",
            )
            .example(example(
                "rust",
                r#"
let (a, b) = (1, 2);
let Point { x, y } = point;
let [first, .., last] = window;

for (index, value) in values.iter().enumerate() {
    println!("{index}: {value}");
}
"#,
            ))
            .build(),
        ],
    )
}

fn error_handling() -> Section {
    section(
        "errors",
        "Error Handling",
        "Option, Result and the ? operator",
        vec![
            subsection(
                "option",
                "Option",
                "Presence or absence without null",
            )
            .example(example(
                "rust",
                r#"
let found: Option<&User> = users.iter().find(|u| u.id == id);

let name = found.map(|u| u.name.as_str()).unwrap_or("anonymous");

if let Some(user) = found {
    greet(user);
}
"#,
            ))
            .warning("unwrap() panics on None; reserve it for tests and provable invariants")
            .build(),
            subsection(
                "result",
                "Result & ?",
                "Propagate errors with ?; convert between error types via From",
            )
            .example(example(
                "rust",
                r#"
use std::fs;

fn read_config(path: &str) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path)?;   // io::Error -> ConfigError via From
    let config = parse(&raw)?;
    Ok(config)
}

match read_config("app.toml") {
    Ok(config) => run(config),
    Err(err) => eprintln!("failed: {err}"),
}
"#,
            ))
            .build(),
            subsection(
                "custom-errors",
                "Error Types in Practice",
                "anyhow for applications, thiserror for libraries",
            )
            .example(titled_example(
                "Application code",
                "rust",
                r#"
use anyhow::{bail, Context, Result};

fn load(path: &str) -> Result<Data> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {path}"))?;
    if raw.is_empty() {
        bail!("{path} is empty");
    }
    Ok(parse(&raw)?)
}
"#,
            ))
            .example(titled_example(
                "Library code",
                "rust",
                r#"
use thiserror::Error;

#[derive(Debug, Error)]
enum StoreError {
    #[error("key {0:?} not found")]
    NotFound(String),
    #[error("storage unavailable")]
    Io(#[from] std::io::Error),
}
"#,
            ))
            .build(),
        ],
    )
}

fn collections() -> Section {
    section(
        "collections",
        "Collections",
        "Vec, HashMap and friends",
        vec![
            subsection(
                "vec",
                "Vec",
                "Growable array; the default collection",
            )
            .example(example(
                "rust",
                r#"
let mut v = vec![1, 2, 3];
v.push(4);
v.retain(|n| n % 2 == 0);

let doubled: Vec<i32> = v.iter().map(|n| n * 2).collect();

if let Some(last) = v.last() {
    println!("last: {last}");
}
"#,
            ))
            .build(),
            subsection(
                "hashmap",
                "HashMap",
                "Key-value storage; the entry API avoids double lookups",
            )
            .example(example(
                "rust",
                r#"
use std::collections::HashMap;

let mut scores: HashMap<String, u32> = HashMap::new();
scores.insert("alice".to_string(), 10);

*scores.entry("bob".to_string()).or_insert(0) += 1;

for (name, score) in &scores {
    println!("{name}: {score}");
}
"#,
            ))
            .tip("Use BTreeMap when you need keys in sorted order")
            .build(),
            subsection(
                "other-collections",
                "Sets & Deques",
                "HashSet for uniqueness, VecDeque for both-ended queues",
            )
            .example(example(
                "rust",
                r#"
use std::collections::{HashSet, VecDeque};

let mut seen = HashSet::new();
assert!(seen.insert("first"));
assert!(!seen.insert("first")); // already present

let mut queue = VecDeque::new();
queue.push_back("job-1");
queue.push_front("urgent");
let next = queue.pop_front();
"#,
            ))
            .build(),
        ],
    )
}

fn iterators() -> Section {
    section(
        "iterators",
        "Iterators & Closures",
        "Lazy adapters and consuming collectors",
        vec![
            subsection(
                "adapters",
                "Adapters",
                "map/filter/take are lazy until a consumer runs them",
            )
            .example(example(
                "rust",
                r#"
let evens_squared: Vec<i32> = (1..=10)
    .filter(|n| n % 2 == 0)
    .map(|n| n * n)
    .collect();

let total: i32 = evens_squared.iter().sum();
let biggest = evens_squared.iter().max();

let pairs: Vec<(usize, char)> = "abc".chars().enumerate().collect();
"#,
            ))
            .build(),
            subsection(
                "collect",
                "collect & Turbofish",
                "collect needs a target type, from context or the turbofish",
            )
            .example(example(
                "rust",
                r#"
let words: Vec<&str> = "a b c".split(' ').collect();
let set = "a b a".split(' ').collect::<std::collections::HashSet<_>>();

// Collecting Results short-circuits on the first Err
let parsed: Result<Vec<i32>, _> = ["1", "2", "x"]
    .iter()
    .map(|s| s.parse::<i32>())
    .collect();
assert!(parsed.is_err());
"#,
            ))
            .tip("iter() borrows, into_iter() consumes, iter_mut() borrows mutably")
            .build(),
            subsection(
                "closures",
                "Closure Captures",
                "Closures capture by reference when they can, by move when told to",
            )
            .example(example(
                "rust",
                r#"
let factor = 3;
let scale = move |n: i32| n * factor; // move forces ownership

let mut counter = 0;
let mut bump = || counter += 1; // FnMut: captures mutably
bump();
bump();
"#,
            ))
            .warning("A closure that outlives the current scope (spawned, stored) must use move")
            .build(),
        ],
    )
}

fn strings() -> Section {
    section(
        "strings",
        "Strings",
        "String vs &str and common conversions",
        vec![
            subsection(
                "string-types",
                "String vs &str",
                "String owns its buffer; &str borrows a view",
            )
            .example(example(
                "rust",
                r#"
let owned: String = String::from("hello");
let borrowed: &str = &owned;
let literal: &'static str = "hi";

fn takes_any(s: &str) {} // accepts both via deref coercion
takes_any(&owned);
takes_any(literal);
"#,
            ))
            .tip("Take &str in function arguments, return String when you allocate")
            .build(),
            subsection(
                "string-ops",
                "Building & Formatting",
                "push_str, format! and joining",
            )
            .example(example(
                "rust",
                r#"
let mut s = String::new();
s.push_str("hello");
s.push(' ');

let greeting = format!("{s}world, {} times", 3);

let csv = ["a", "b", "c"].join(",");
let trimmed = "  padded  ".trim();
let shouted = "quiet".to_uppercase();
"#,
            ))
            .build(),
            subsection(
                "parsing",
                "Parsing",
                "parse() with a target type; returns Result",
            )
            .example(example(
                "rust",
                r#"
let n: i32 = "42".parse()?;
let f = "3.14".parse::<f64>()?;

let maybe: Option<u16> = "8080".parse().ok();

for line in input.lines() {
    let fields: Vec<&str> = line.split('\t').collect();
}
"#,
            ))
            .warning("Indexing a String by integer is a compile error; strings are UTF-8, use chars() or byte slices deliberately")
            .build(),
        ],
    )
}

fn concurrency() -> Section {
    section(
        "concurrency",
        "Concurrency",
        "Threads, channels and shared state",
        vec![
            subsection(
                "threads",
                "Threads",
                "spawn returns a handle; join waits and yields the closure's value",
            )
            .example(example(
                "rust",
                r#"
use std::thread;

let handle = thread::spawn(move || {
    expensive_work()
});

let result = handle.join().expect("worker panicked");
"#,
            ))
            .build(),
            subsection(
                "channels",
                "Channels",
                "mpsc: many senders, one receiver",
            )
            .example(example(
                "rust",
                r#"
use std::sync::mpsc;
use std::thread;

let (tx, rx) = mpsc::channel();
for id in 0..4 {
    let tx = tx.clone();
    thread::spawn(move || tx.send(work(id)).unwrap());
}
drop(tx); // receiver stops when all senders are gone

for result in rx {
    println!("{result:?}");
}
"#,
            ))
            .build(),
            subsection(
                "shared-state",
                "Arc & Mutex",
                "Arc shares ownership across threads; Mutex guards mutation",
            )
            .example(example(
                "rust",
                r#"
use std::sync::{Arc, Mutex};
use std::thread;

let counter = Arc::new(Mutex::new(0));
let mut handles = Vec::new();

for _ in 0..8 {
    let counter = Arc::clone(&counter);
    handles.push(thread::spawn(move || {
        *counter.lock().unwrap() += 1;
    }));
}
for handle in handles {
    handle.join().unwrap();
}
"#,
            ))
            .tip("Prefer channels for pipelines; reach for Mutex when state is truly shared")
            .warning("Holding a lock across an await point or a long computation invites contention")
            .build(),
        ],
    )
}

fn modules_and_testing() -> Section {
    section(
        "modules-testing",
        "Modules & Testing",
        "Code organization and the built-in test harness",
        vec![
            subsection(
                "modules",
                "Modules & Visibility",
                "mod builds the tree; pub opens it up; use shortens paths",
            )
            .example(example(
                "rust",
                r#"
mod network {
    pub mod server {
        pub fn start() {}
        fn internal() {} // private to this module
    }
}

use network::server;
server::start();

pub(crate) fn helper() {} // visible inside the crate only
"#,
            ))
            .build(),
            subsection(
                "testing",
                "Unit Tests",
                "Tests live next to the code in a cfg(test) module",
            )
            .example(example(
                "rust",
                r#"
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds() {
        assert_eq!(add(2, 2), 4);
    }

    #[test]
    #[should_panic(expected = "divide by zero")]
    fn test_div_by_zero_panics() {
        divide(1, 0);
    }
}
"#,
            ))
            .tip("cargo test -- --nocapture shows println! output from passing tests")
            .build(),
            subsection(
                "cargo",
                "Cargo Essentials",
                "The commands that cover a working day",
            )
            .example(example(
                "bash",
                r#"
cargo new my-app          # create a binary crate
cargo add serde --features derive
cargo check               # fast type-check, no codegen
cargo clippy -- -D warnings
cargo fmt
cargo test scrollspy      # run tests matching a name
cargo run --release
"#,
            ))
            .build(),
        ],
    )
}
