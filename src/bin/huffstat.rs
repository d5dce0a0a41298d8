//! Builds Huffman codes for a text file and reports how they compare with a
//! fixed-length code, optionally against reference frequencies and a second
//! text.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use huffman_text::analysis::{encoded_bit_length, percent_diff, Comparison};
use huffman_text::{render, snapshot, FrequencyTable, HuffmanCodec};

/// Reference frequencies are fractions; this turns them into integer weights.
const REFERENCE_SCALE: f64 = 1e9;

#[derive(Parser, Debug)]
#[command(name = "huffstat", version, about = "Huffman code statistics for text files")]
struct Args {
    /// Text to build codes for
    input: PathBuf,

    /// Reference frequencies: JSON array of {"Char": <code point>, "Freq": <number>}
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Second text, measured with codes extended to cover its alphabet
    #[arg(long)]
    compare: Option<PathBuf>,

    /// Directory for JSON snapshots and tree drawings
    #[arg(long)]
    out_dir: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log: String,
}

#[derive(Deserialize)]
struct ReferenceEntry {
    #[serde(rename = "Char")]
    code_point: u32,
    #[serde(rename = "Freq")]
    freq: f64,
}

fn parse_reference(json: &str) -> anyhow::Result<FrequencyTable> {
    let entries: Vec<ReferenceEntry> =
        serde_json::from_str(json).context("parsing reference frequencies")?;

    let mut table = FrequencyTable::new();
    for entry in entries {
        let Some(symbol) = char::from_u32(entry.code_point) else {
            bail!("reference code point {} is not a character", entry.code_point);
        };
        if !entry.freq.is_finite() || entry.freq < 0.0 {
            bail!("reference frequency for {symbol:?} is {}", entry.freq);
        }
        table.insert(symbol, (entry.freq * REFERENCE_SCALE).round() as u64);
    }
    Ok(table)
}

/// 1234567 -> "1,234,567"
fn group_digits(n: impl Into<i128>) -> String {
    let n = n.into();
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn timed<T>(what: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = f();
    tracing::info!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "{what}");
    value
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_outputs(out_dir: &Path, tag: &str, codec: &HuffmanCodec) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let suffix = if tag.is_empty() {
        String::new()
    } else {
        format!("-{tag}")
    };

    let json_path = out_dir.join(format!("output{suffix}.json"));
    let tree_path = out_dir.join(format!("output{suffix}-tree.txt"));

    let json = snapshot::to_json_pretty(codec.table(), codec.tree())?;
    fs::write(&json_path, json).with_context(|| format!("writing {}", json_path.display()))?;
    fs::write(&tree_path, render::visualize(codec.tree(), codec.table()))
        .with_context(|| format!("writing {}", tree_path.display()))?;

    tracing::info!(
        snapshot = %json_path.display(),
        drawing = %tree_path.display(),
        tree_size = codec.table().len(),
        depth = codec.tree().depth(),
        "wrote outputs"
    );
    Ok(())
}

fn verify(text: &str, codec: &HuffmanCodec) -> anyhow::Result<()> {
    if codec.verify(text)? {
        println!("Verification successful");
    } else {
        tracing::error!("decoded text differs from the input");
        println!("Verification failed");
    }
    Ok(())
}

fn build_codec(what: &str, frequencies: &FrequencyTable) -> anyhow::Result<HuffmanCodec> {
    timed(what, || HuffmanCodec::from_frequencies(frequencies)).with_context(|| format!("failed to {what}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .init();

    let text = read_text(&args.input)?;
    let mut frequencies = FrequencyTable::from_text(&text);
    tracing::debug!(symbols = frequencies.total(), distinct = frequencies.len(), "counted input");

    let codec = build_codec("create codes", &frequencies)?;
    if let Some(out_dir) = &args.out_dir {
        write_outputs(out_dir, "", &codec)?;
    }
    verify(&text, &codec)?;

    let own = Comparison::measure(&frequencies, codec.table())?;
    println!("{} bits for huffman encoding", group_digits(own.huffman_bits));
    println!(
        "{} bits for fixed encoding ({} bit encoding)",
        group_digits(own.fixed_bits),
        own.fixed_width
    );
    println!("{:.2}% space saved", own.saved_percent);

    let mut reference = None;
    if let Some(path) = &args.reference {
        println!("\nReference frequencies\n");

        let mut reference_freqs = parse_reference(&read_text(path)?)
            .with_context(|| format!("loading {}", path.display()))?;
        reference_freqs.extend_missing(&frequencies);

        let reference_codec = build_codec("create reference codes", &reference_freqs)?;
        if let Some(out_dir) = &args.out_dir {
            write_outputs(out_dir, "avg", &reference_codec)?;
        }
        verify(&text, &reference_codec)?;

        let reference_bits = encoded_bit_length(&frequencies, reference_codec.table())?;
        println!("{} bits for reference huffman encoding", group_digits(reference_bits));
        println!(
            "{:.2}% space saved from fixed",
            percent_diff(own.fixed_bits, reference_bits)
        );
        println!(
            "Huffman {:.2}% better",
            percent_diff(reference_bits, own.huffman_bits)
        );

        reference = Some(reference_freqs);
    }

    if let Some(path) = &args.compare {
        println!("\nComparison text\n");

        let other = read_text(path)?;
        let other_freqs = FrequencyTable::from_text(&other);

        // the second text may use symbols neither table has seen
        frequencies.extend_missing(&other_freqs);
        let new_codec = build_codec("create new codes", &frequencies)?;
        let other_cmp = Comparison::measure(&other_freqs, new_codec.table())?;

        if let Some(mut reference_freqs) = reference {
            reference_freqs.extend_missing(&other_freqs);
            let new_reference_codec = build_codec("create new reference codes", &reference_freqs)?;
            let other_reference_bits = encoded_bit_length(&other_freqs, new_reference_codec.table())?;
            println!(
                "{} bits for reference huffman encoding",
                group_digits(other_reference_bits)
            );
            println!("{} bits for huffman encoding", group_digits(other_cmp.huffman_bits));
            println!(
                "Huffman is {:.2}% better than reference",
                percent_diff(other_reference_bits, other_cmp.huffman_bits)
            );
        } else {
            println!("{} bits for huffman encoding", group_digits(other_cmp.huffman_bits));
        }
        println!("{} bits for fixed encoding", group_digits(other_cmp.fixed_bits));
    }

    Ok(())
}
