use backlinks::bst::Tree;

use std::collections::HashSet;

fn build(xs: &[i8]) -> Tree<i8> {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(*x);
    }
    tree
}

quickcheck::quickcheck! {
    fn in_order_is_sorted(xs: Vec<i8>) -> bool {
        let tree = build(&xs);
        let mut sorted = xs;
        sorted.sort_unstable();

        tree.to_vec() == sorted
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree = build(&xs);

        xs.iter().all(|x| tree.search(x).map(|node| node.value()) == Some(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = build(&xs);
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.search(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = build(&xs);
        let mut still_present = xs;
        still_present.sort_unstable();

        for delete in &deletes {
            let before = tree.len();
            let deleted = tree.delete(delete);
            let expected = still_present
                .binary_search(delete)
                .ok()
                .map(|pos| still_present.remove(pos));
            if deleted != expected || tree.len() != still_present.len() {
                return false;
            }
            if deleted.is_some() && tree.len() != before - 1 {
                return false;
            }
        }

        tree.to_vec() == still_present
    }
}

quickcheck::quickcheck! {
    fn deletes_keep_parent_links(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = build(&xs);
        for delete in &deletes {
            tree.delete(delete);
        }

        let mut pending: Vec<_> = tree.root().into_iter().collect();
        let mut reached = 0;
        while let Some(node) = pending.pop() {
            reached += 1;
            for child in [node.left(), node.right()].into_iter().flatten() {
                match child.parent() {
                    Some(parent) if std::ptr::eq(parent, node) => pending.push(child),
                    _ => return false,
                }
            }
        }
        reached == tree.len() && tree.root().is_none_or(|root| root.is_root())
    }
}

quickcheck::quickcheck! {
    fn minimum_and_maximum(xs: Vec<i8>) -> bool {
        let tree = build(&xs);

        tree.minimum().map(|n| n.value()) == xs.iter().min()
            && tree.maximum().map(|n| n.value()) == xs.iter().max()
    }
}
