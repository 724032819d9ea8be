use std::collections::{HashSet, VecDeque};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::{Chain, MarkovError, TextGeneratorOptions, build_chain, generate, generate_text};

const DOLLAR: &str = "I'd buy that for a dollar! I'd buy this for two dollars! I'd buy that for a dollar!";

fn words(values: &[&str]) -> Vec<String> {
	values.iter().map(|v| (*v).to_owned()).collect()
}

fn dollar_chain() -> Chain {
	build_chain(DOLLAR, 2, false).unwrap()
}

#[test]
fn dollar_text_transitions() {
	let chain = dollar_chain();

	let successors = chain.lookup(&words(&["I'd", "buy"])).unwrap();
	assert_eq!(successors.get("that"), Some(&2));
	assert_eq!(successors.get("this"), Some(&1));
	assert_eq!(successors.len(), 2);

	assert_eq!(chain.coherence(), 2);
	assert_eq!(chain.len(), 13);
}

#[test]
fn dollar_text_starting_states() {
	let chain = dollar_chain();
	assert_eq!(chain.starting_states(), [words(&["I'd", "buy"]), words(&["", "I'd"])]);
}

#[test]
fn coherence_beyond_token_count_is_rejected() {
	// 18 words plus the closing paragraph break
	assert!(build_chain(DOLLAR, 19, false).is_ok());
	assert!(matches!(build_chain(DOLLAR, 100, false), Err(MarkovError::InvalidInput(_))));
}

#[test]
fn every_window_is_counted_once() {
	let chain = dollar_chain();
	let total: usize = chain.states().map(|state| state.occurrences()).sum();
	assert_eq!(total, 19);
}

#[test]
fn every_successor_state_exists() {
	let chain = build_chain("One fish. Two fish.\n\nRed fish, blue fish!", 3, false).unwrap();

	for state in chain.states() {
		for next in state.transitions().keys() {
			let mut successor = state.words()[1..].to_vec();
			successor.push(next.clone());
			assert!(chain.lookup(&successor).is_ok(), "{successor:?} is missing");
		}
	}
}

#[test]
fn every_state_is_reachable_from_a_start() {
	for (text, coherence) in [
		(DOLLAR, 2),
		("One fish. Two fish.\n\nRed fish, blue fish!", 3),
		("no punctuation at all", 1),
	] {
		let chain = build_chain(text, coherence, false).unwrap();

		let mut visited: HashSet<Vec<String>> = chain.starting_states().iter().cloned().collect();
		let mut queue: VecDeque<Vec<String>> = visited.iter().cloned().collect();
		while let Some(key) = queue.pop_front() {
			for next in chain.lookup(&key).unwrap().keys() {
				let mut successor = key[1..].to_vec();
				successor.push(next.clone());
				if visited.insert(successor.clone()) {
					queue.push_back(successor);
				}
			}
		}

		assert_eq!(visited.len(), chain.len(), "{text:?}");
		for state in chain.states() {
			assert!(visited.contains(state.words()), "{:?} is unreachable", state.words());
		}
	}
}

#[test]
fn empty_text_builds_a_usable_chain() {
	let chain = build_chain("", 1, false).unwrap();
	assert!(chain.is_end_of_sentence(""));
	assert_eq!(generate_text(&chain, &TextGeneratorOptions::sentences(1)).unwrap(), "");
}

#[test]
fn ignoring_line_breaks_removes_the_sentinel() {
	let chain = build_chain("First line.\nSecond line.\n\nThird paragraph.", 2, true).unwrap();

	for state in chain.states() {
		assert!(state.words().iter().all(|word| !word.is_empty()), "{:?}", state.words());
		assert!(state.transitions().keys().all(|next| !next.is_empty()), "{:?}", state.words());
	}
}

#[test]
fn zero_bounds_give_empty_text() {
	let chain = dollar_chain();
	let mut rng = StdRng::seed_from_u64(0);
	assert_eq!(generate(&chain, &TextGeneratorOptions::words(0), &mut rng).unwrap(), "");
	assert_eq!(generate(&chain, &TextGeneratorOptions::sentences(0), &mut rng).unwrap(), "");
	assert_eq!(generate(&chain, &TextGeneratorOptions::paragraphs(0), &mut rng).unwrap(), "");
}

#[test]
fn one_word_is_a_sentence_start() {
	let chain = dollar_chain();
	for seed in 0..10 {
		let output = generate(&chain, &TextGeneratorOptions::words(1), &mut StdRng::seed_from_u64(seed)).unwrap();
		assert_eq!(output, "I'd");
	}
}

#[test]
fn generation_is_reproducible() {
	let chain = dollar_chain();
	let options = TextGeneratorOptions::sentences(10);

	let first = generate(&chain, &options, &mut StdRng::seed_from_u64(1984)).unwrap();
	let second = generate(&chain, &options, &mut StdRng::seed_from_u64(1984)).unwrap();
	assert_eq!(first, second);
	assert!(!first.is_empty());
}

#[test]
fn generated_sentences_come_from_the_source() {
	let chain = dollar_chain();
	let options = TextGeneratorOptions::sentences(5);

	let output = generate(&chain, &options, &mut StdRng::seed_from_u64(7)).unwrap();
	let sentences: Vec<&str> = output.split_inclusive('!').map(str::trim).filter(|s| !s.is_empty()).collect();
	assert_eq!(sentences.len(), 5, "{output}");
	for sentence in sentences {
		assert!(
			sentence == "I'd buy that for a dollar!" || sentence == "I'd buy this for two dollars!",
			"{sentence}"
		);
	}
}

#[test]
fn serialized_chain_generates_the_same_text() {
	let chain = dollar_chain();
	let restored = Chain::from_bytes(&chain.to_bytes().unwrap()).unwrap();
	assert_eq!(restored, chain);

	let options = TextGeneratorOptions::words(40);
	assert_eq!(
		generate(&chain, &options, &mut StdRng::seed_from_u64(3)).unwrap(),
		generate(&restored, &options, &mut StdRng::seed_from_u64(3)).unwrap()
	);
}
