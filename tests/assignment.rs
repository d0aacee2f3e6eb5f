mod common;

use common::{random_blob, ring, seeded, star, triangle};
use shapematch::{
    BinaryMask, BoundingBox, Candidate, GreedyAssigner, MatchOrigin, NormalizeConfig, Point,
    QueryShape,
};

fn candidate(mask: &BinaryMask, center: Point) -> Candidate {
    let bbox = BoundingBox {
        x: center.x,
        y: center.y,
        width: mask.width(),
        height: mask.height(),
    };
    Candidate::from_mask(center, bbox, mask, NormalizeConfig::default()).unwrap()
}

fn query(mask: BinaryMask) -> QueryShape {
    QueryShape::new(mask, NormalizeConfig::default()).unwrap()
}

#[test]
fn duplicates_win_among_noise_without_reuse() {
    let mut rng = seeded(7);
    let shapes = [ring(26, 4.0), triangle(30), star(32)];

    let mut candidates = Vec::new();
    for i in 0..6 {
        candidates.push(candidate(&random_blob(&mut rng, 30), Point::new(10 * i, 100)));
    }
    let dup_idx: Vec<usize> = shapes
        .iter()
        .enumerate()
        .map(|(i, mask)| {
            // Interleave the duplicates with the noise.
            let at = 2 * i + 1;
            candidates.insert(at, candidate(mask, Point::new(200 + 40 * i, 50)));
            at
        })
        .collect();
    assert_eq!(dup_idx, vec![1, 3, 5]);

    let queries: Vec<QueryShape> = shapes.iter().cloned().map(query).collect();
    let assignment = GreedyAssigner::new(&candidates, Point::default())
        .assign_all(&queries)
        .unwrap();

    assert_eq!(assignment.matches.len(), 3);
    for (i, m) in assignment.matches.iter().enumerate() {
        assert_eq!(m.score, 0.0);
        assert_eq!(m.origin, MatchOrigin::Blob);
        assert_eq!(m.point, Some(Point::new(200 + 40 * i, 50)));
    }
    assert_eq!(assignment.used.iter().copied().collect::<Vec<_>>(), dup_idx);
}

#[test]
fn fewer_candidates_than_queries_leaves_tail_absent() {
    let candidates = vec![
        candidate(&ring(20, 3.0), Point::new(5, 5)),
        candidate(&triangle(20), Point::new(40, 5)),
    ];
    let queries = vec![query(ring(20, 3.0)), query(triangle(20)), query(star(20))];
    let assignment = GreedyAssigner::new(&candidates, Point::new(100, 200))
        .assign_all(&queries)
        .unwrap();

    let present = assignment.matches.iter().filter(|m| !m.is_absent()).count();
    assert_eq!(present, 2);
    assert!(assignment.matches[2].is_absent());
    assert!(assignment.matches[2].score.is_infinite());
    assert_eq!(assignment.matches[0].point, Some(Point::new(105, 205)));
    assert_eq!(assignment.matches[1].point, Some(Point::new(140, 205)));
}

#[test]
fn earlier_query_takes_a_shared_best_candidate() {
    // Two identical queries compete for a single exact duplicate.
    let candidates = vec![
        candidate(&star(24), Point::new(1, 1)),
        candidate(&ring(24, 4.0), Point::new(2, 2)),
    ];
    let queries = vec![query(ring(24, 4.0)), query(ring(24, 4.0))];
    let assignment = GreedyAssigner::new(&candidates, Point::default())
        .assign_all(&queries)
        .unwrap();

    assert_eq!(assignment.matches[0].point, Some(Point::new(2, 2)));
    assert_eq!(assignment.matches[0].score, 0.0);
    assert_eq!(assignment.matches[1].point, Some(Point::new(1, 1)));
    assert!(assignment.matches[1].score > 0.0);
}

#[test]
fn empty_query_keeps_its_slot() {
    let candidates = vec![candidate(&triangle(20), Point::new(3, 4))];
    let queries = vec![query(BinaryMask::zeros(30, 30).unwrap()), query(triangle(20))];
    let mut assigner = GreedyAssigner::new(&candidates, Point::default());
    let first = assigner.assign_next(&queries[0]).unwrap();
    assert!(first.is_absent());
    assert_eq!(assigner.remaining(), 1);
    let second = assigner.assign_next(&queries[1]).unwrap();
    assert_eq!(second.point, Some(Point::new(3, 4)));
    assert_eq!(assigner.remaining(), 0);
}
