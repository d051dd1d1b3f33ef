use searchagg_core::codec::JsonCodec;
use searchagg_core::node::Node;
use searchagg_core::variant::TaggedUnion;
use shape::{Shape, ShapeKind, chain};
use std::thread;

mod shape;

#[test]
fn test_dispatch_tables_are_shared_across_threads() {
    let codec = JsonCodec::default();
    let input = codec.encode_node(&chain(20)).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let mut decoded = Vec::new();
                    for _ in 0..25 {
                        let node: Node<Shape> = codec.decode_node(&input).unwrap();
                        decoded.push(node.depth());
                    }
                    decoded
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().iter().all(|depth| *depth == 20));
        }
    });
}

#[test]
fn test_first_use_of_a_table_races_safely() {
    thread::scope(|scope| {
        let tables: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| Shape::dispatch_table() as *const _ as usize))
            .collect();

        let addresses: Vec<usize> = tables.into_iter().map(|t| t.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    });
}

#[test]
fn test_decoded_trees_can_be_read_concurrently() {
    let tree = chain(10);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(tree.kind(), ShapeKind::Group);
                assert_eq!(tree.descendants().count(), 10);
            });
        }
    });
}
