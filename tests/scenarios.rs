use huffman_text::analysis::{fixed_length_bits, Comparison};
use huffman_text::{
    build, decode, encode, render, snapshot, BitVec, FrequencyTable, HuffmanCodec, HuffmanError,
    HuffmanTree,
};

fn classic() -> FrequencyTable {
    [('A', 5), ('B', 9), ('C', 12), ('D', 13), ('E', 16), ('F', 45)]
        .into_iter()
        .collect()
}

#[test]
fn classic_code_lengths_follow_frequency() {
    let freqs = classic();
    let (table, tree) = build(&freqs).unwrap();

    let len = |s| table.code_len(s).unwrap();
    assert_eq!(len('F'), 1);
    assert!(len('F') < len('E'));
    assert!(len('E') <= len('A'));
    assert!(len('C') <= len('B'));
    assert_eq!(len('A'), len('B'));

    let cmp = Comparison::measure(&freqs, &table).unwrap();
    assert!(cmp.huffman_bits < 100 * 3);
    assert_eq!(cmp.huffman_bits, 224);
    assert_eq!(tree.weight(), 100);
}

#[test]
fn single_symbol_table_round_trips_three_symbols() {
    let freqs: FrequencyTable = [('x', 7)].into_iter().collect();
    let (table, tree) = build(&freqs).unwrap();
    assert_eq!(table.code_len('x'), Some(1));

    let bits = encode(['x', 'x', 'x'], &table).unwrap();
    assert_eq!(bits.len(), 3);
    assert_eq!(decode(&bits, &tree).unwrap(), vec!['x', 'x', 'x']);
}

#[test]
fn empty_table_is_rejected() {
    assert!(matches!(
        build(&FrequencyTable::new()),
        Err(HuffmanError::EmptyInput)
    ));
    assert!(matches!(
        HuffmanCodec::from_text(""),
        Err(HuffmanError::EmptyInput)
    ));
}

#[test]
fn skewed_counts_beat_fixed_width() {
    let text = format!("{}{}{}{}", "e".repeat(500), "t".repeat(60), "a".repeat(30), "q");
    let freqs = FrequencyTable::from_text(&text);
    let (table, _) = build(&freqs).unwrap();
    let cmp = Comparison::measure(&freqs, &table).unwrap();
    assert!(cmp.huffman_bits < fixed_length_bits(freqs.total(), freqs.len()));
    assert!(cmp.saved_percent > 0.0);
}

#[test]
fn codes_from_one_text_cover_another_after_extension() {
    let first = "the quick brown fox";
    let second = "jumps over the lazy dog!";

    let mut freqs = FrequencyTable::from_text(first);
    let second_freqs = FrequencyTable::from_text(second);
    assert!(matches!(
        HuffmanCodec::from_frequencies(&freqs).unwrap().encode_str(second),
        Err(HuffmanError::UnknownSymbol(_))
    ));

    freqs.extend_missing(&second_freqs);
    let codec = HuffmanCodec::from_frequencies(&freqs).unwrap();
    assert!(codec.verify(first).unwrap());
    assert!(codec.verify(second).unwrap());
    assert_eq!(
        codec.encoded_bit_length(&second_freqs).unwrap(),
        codec.encode_str(second).unwrap().len() as u64
    );
}

#[test]
fn corrupted_stream_is_reported() {
    let codec = HuffmanCodec::from_frequencies(&classic()).unwrap();
    let bits = codec.encode_str("ABF").unwrap();
    let truncated: BitVec = bits.iter().take(bits.len() - 2).collect();
    assert!(matches!(
        codec.decode(&truncated),
        Err(HuffmanError::TruncatedStream { .. })
    ));
}

#[test]
fn snapshot_and_drawing_describe_the_same_tree() {
    let text = "a man a plan a canal panama\n";
    let codec = HuffmanCodec::from_text(text).unwrap();

    let json = snapshot::to_json_pretty(codec.table(), codec.tree()).unwrap();
    let reloaded = snapshot::load_tree(&json).unwrap();
    assert_eq!(&reloaded, codec.tree());

    let decoded: String = decode(&codec.encode_str(text).unwrap(), &reloaded)
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(decoded, text);

    let drawing = render::visualize(codec.tree(), codec.table());
    let nodes = codec.tree().preorder().count();
    assert_eq!(drawing.lines().count(), nodes);
    assert!(drawing.contains("LF (1, "));
    assert!(drawing.starts_with("├── 🞄 (28)"));
}

#[test]
fn tree_rebuilt_from_leaf_weights_is_identical() {
    let tree = HuffmanTree::from_text("peter piper picked a peck").unwrap();
    let again = HuffmanTree::from_frequencies(&tree.frequencies()).unwrap();
    assert_eq!(again.weight(), tree.weight());
    assert_eq!(again.code_table().unwrap().len(), tree.code_table().unwrap().len());
}
