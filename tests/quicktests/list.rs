use backlinks::list::LinkedList;

quickcheck::quickcheck! {
    fn appends_are_indexable(xs: Vec<i8>) -> bool {
        let list: LinkedList<_> = xs.iter().copied().collect();

        list.len() == xs.len()
            && xs.iter().enumerate().all(|(i, x)| list.get(i) == Some(x))
            && list.get(xs.len()).is_none()
    }
}

quickcheck::quickcheck! {
    fn reverse_twice_is_identity(xs: Vec<i8>) -> bool {
        let mut list: LinkedList<_> = xs.iter().copied().collect();

        list.reverse();
        let reversed = list.iter().copied().eq(xs.iter().rev().copied());
        list.reverse();

        reversed && list.iter().eq(xs.iter()) && list.first() == xs.first()
    }
}

quickcheck::quickcheck! {
    fn insert_then_remove_is_noop(xs: Vec<i8>, index: usize, value: i8) -> bool {
        let mut list: LinkedList<_> = xs.iter().copied().collect();
        let index = index % (xs.len() + 1);

        list.insert(value, index);
        let inserted = list.get(index) == Some(&value) && list.len() == xs.len() + 1;
        let removed = list.remove_at(index);

        inserted && removed == value && list.iter().eq(xs.iter())
    }
}

quickcheck::quickcheck! {
    fn out_of_range_inserts_hand_the_value_back(xs: Vec<i8>, past: u8, value: i8) -> bool {
        let mut list: LinkedList<_> = xs.iter().copied().collect();
        let index = xs.len() + 1 + past as usize;

        let handed_back = match list.try_insert(value, index) {
            Err(err) => err.into_value() == Some(value),
            Ok(()) => false,
        };
        handed_back && list.len() == xs.len()
    }
}
