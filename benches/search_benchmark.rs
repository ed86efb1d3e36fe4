use criterion::{criterion_group, criterion_main, Criterion};

use gamesearch::prelude::*;

/// A balanced binary value-tree with deterministic pseudo-random leaves.
#[derive(Clone, Debug)]
enum ValueTree {
    Leaf(i32),
    Node(Box<ValueTree>, Box<ValueTree>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

impl GameState for ValueTree {
    type Action = Direction;
    type Eval = i32;

    fn has_moves(&self) -> bool {
        matches!(self, ValueTree::Node(..))
    }

    fn score(&self) -> Score<i32> {
        match self {
            ValueTree::Leaf(value) => Score::Regular(*value),
            ValueTree::Node(..) => Score::Regular(0),
        }
    }

    fn sorted_actions(&self) -> Vec<Direction> {
        match self {
            ValueTree::Leaf(_) => Vec::new(),
            ValueTree::Node(..) => vec![Direction::Left, Direction::Right],
        }
    }

    fn create_child(&self, action: &Direction) -> Self {
        match (self, action) {
            (ValueTree::Node(left, _), Direction::Left) => (**left).clone(),
            (ValueTree::Node(_, right), Direction::Right) => (**right).clone(),
            (ValueTree::Leaf(_), _) => unreachable!("leaves have no children"),
        }
    }
}

fn build_tree(depth: u32, seed: &mut u64) -> ValueTree {
    if depth == 0 {
        // xorshift keeps the fixture deterministic without a rand dependency
        // in the hot path.
        *seed ^= *seed << 13;
        *seed ^= *seed >> 7;
        *seed ^= *seed << 17;
        ValueTree::Leaf((*seed % 3) as i32 - 1)
    } else {
        let left = build_tree(depth - 1, seed);
        let right = build_tree(depth - 1, seed);
        ValueTree::Node(Box::new(left), Box::new(right))
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut seed = 0x2545_F491_4F6C_DD1D;
    let tree = build_tree(12, &mut seed);

    c.bench_function("alpha beta depth 12 tree", |b| {
        b.iter(|| {
            let mut context = SearchContext::new(12);
            best_action(&mut context, &tree)
        })
    });

    c.bench_function("resumable depth 12 tree, no pauses", |b| {
        b.iter(|| begin(Request::new(tree.clone(), 12)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
