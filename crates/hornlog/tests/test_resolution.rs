//! Resolver behaviour through the knowledge base: builtin comparisons,
//! resource limits, occurs check and concurrent queries

use hornlog::json::AnswerJson;
use hornlog::{KnowledgeBase, QueryOutcome, Relation, ResolverConfig, Term};
use std::sync::Arc;
use std::thread;

#[test]
fn test_smaller_via_builtin() {
    // smaller(X, Y) :- X < Y.
    let mut kb = KnowledgeBase::new();
    let smaller = kb.functor("smaller");
    let x = kb.variable("X");
    let y = kb.variable("Y");
    kb.add_rule(
        smaller.apply([x.into(), y.into()]).unwrap(),
        [Relation::less_than().apply(x, y)],
    );

    let goal = |a: Term, b: Term| smaller.apply([a, b]).unwrap();
    assert!(kb.query(&goal(Term::Integer(1), Term::Integer(2))));
    assert!(!kb.query(&goal(Term::Integer(2), Term::Integer(1))));
    assert!(!kb.query(&goal(Term::Integer(2), Term::Integer(2))));

    // X is still unbound when the comparison runs
    let open = kb.variable("Z");
    assert!(!kb.query(&goal(open.into(), Term::Integer(2))));
}

#[test]
fn test_every_builtin_relation() {
    let kb = KnowledgeBase::new();
    let cases = [
        (Relation::less_than(), [true, false, false]),
        (Relation::less_or_equal(), [true, true, false]),
        (Relation::greater_than(), [false, false, true]),
        (Relation::greater_or_equal(), [false, true, true]),
        (Relation::equal(), [false, true, false]),
        (Relation::not_equal(), [true, false, true]),
    ];
    for (relation, expected) in cases {
        let got = [(1i64, 2i64), (2, 2), (3, 2)].map(|(l, r)| kb.query(&relation.apply(l, r)));
        assert_eq!(got, expected, "relation {}", relation.name());
    }
}

#[test]
fn test_user_relation() {
    let mut kb = KnowledgeBase::new();
    let divides = kb.relation("divides", |d, n| d != 0 && n % d == 0);
    let even = kb.functor("even");
    let x = kb.variable("X");
    kb.add_rule(even.apply([x.into()]).unwrap(), [divides.apply(2i64, x)]);

    assert!(kb.query(&even.apply([Term::Integer(10)]).unwrap()));
    assert!(!kb.query(&even.apply([Term::Integer(7)]).unwrap()));
}

#[test]
fn test_comparison_passed_through_head_argument() {
    // holds(T) :- T.
    let mut kb = KnowledgeBase::new();
    let holds = kb.functor("holds");
    let t = kb.variable("T");
    kb.add_rule(holds.apply([t.into()]).unwrap(), [t.into()]);

    let lt = Relation::less_than();
    assert!(kb.query(&holds.apply([lt.apply(1i64, 2i64)]).unwrap()));
    assert!(!kb.query(&holds.apply([lt.apply(2i64, 1i64)]).unwrap()));

    // The comparison sees bindings made by earlier body goals
    // check(X) :- value(X), holds(X > 3).
    let value = kb.functor("value");
    let check = kb.functor("check");
    let x = kb.variable("X");
    kb.add_facts([
        value.apply([Term::Integer(2)]).unwrap(),
        value.apply([Term::Integer(5)]).unwrap(),
    ])
    .add_rule(
        check.apply([x.into()]).unwrap(),
        [
            value.apply([x.into()]).unwrap(),
            holds
                .apply([Relation::greater_than().apply(x, 3i64)])
                .unwrap(),
        ],
    );

    let y = kb.variable("Y");
    let answer = kb.ask(&check.apply([y.into()]).unwrap()).unwrap();
    assert_eq!(answer.get(&y), Some(&Term::Integer(5)));
}

#[test]
fn test_occurs_check_blocks_cyclic_answer() {
    // same(X, X).
    let mut kb = KnowledgeBase::new();
    let same = kb.functor("same");
    let f = kb.functor("f");
    let x = kb.variable("X");
    kb.add_fact(same.apply([x.into(), x.into()]).unwrap());

    let y = kb.variable("Y");
    let cyclic = same
        .apply([y.into(), f.apply([y.into()]).unwrap()])
        .unwrap();
    assert!(!kb.query(&cyclic));

    let a = kb.constant("a");
    assert!(kb.query(&same.apply([a.clone(), a]).unwrap()));
}

#[test]
fn test_divergent_program_hits_step_limit() {
    // nat(0).  nat(s(X)) :- nat(X).   query: nat(Y), Y = stop  (never provable)
    let mut kb = KnowledgeBase::new().with_config(ResolverConfig::with_max_steps(1_000));
    let nat = kb.functor("nat");
    let succ = kb.functor("s");
    let looping = kb.functor("forever");
    let x = kb.variable("X");
    kb.add_fact(nat.apply([Term::Integer(0)]).unwrap())
        .add_rule(
            nat.apply([succ.apply([x.into()]).unwrap()]).unwrap(),
            [nat.apply([x.into()]).unwrap()],
        )
        .add_rule(
            looping.apply([x.into()]).unwrap(),
            [
                nat.apply([x.into()]).unwrap(),
                Relation::less_than().apply(x, 0i64),
            ],
        );

    let y = kb.variable("Y");
    assert_eq!(
        kb.solve(&looping.apply([y.into()]).unwrap()),
        QueryOutcome::ResourceLimit
    );

    // The same knowledge base still answers terminating queries
    let two = succ
        .apply([succ.apply([Term::Integer(0)]).unwrap()])
        .unwrap();
    assert!(kb.solve(&nat.apply([two]).unwrap()).is_proved());
}

#[test]
fn test_concurrent_queries() {
    let mut kb = KnowledgeBase::new();
    let edge = kb.functor("edge");
    let path = kb.functor("path");
    let nodes: Vec<Term> = (0..8).map(|i| kb.constant(&format!("n{}", i))).collect();
    let x = kb.variable("X");
    let y = kb.variable("Y");
    let z = kb.variable("Z");

    kb.add_facts(
        nodes
            .windows(2)
            .map(|w| edge.apply([w[0].clone(), w[1].clone()]).unwrap()),
    )
    .add_rule(
        path.apply([x.into(), y.into()]).unwrap(),
        [edge.apply([x.into(), y.into()]).unwrap()],
    )
    .add_rule(
        path.apply([x.into(), z.into()]).unwrap(),
        [
            edge.apply([x.into(), y.into()]).unwrap(),
            path.apply([y.into(), z.into()]).unwrap(),
        ],
    );

    let kb = Arc::new(kb);
    let nodes = Arc::new(nodes);
    let handles: Vec<_> = (0..4)
        .map(|start| {
            let kb = Arc::clone(&kb);
            let nodes = Arc::clone(&nodes);
            thread::spawn(move || {
                let forward = path
                    .apply([nodes[start].clone(), nodes[7].clone()])
                    .unwrap();
                let backward = path
                    .apply([nodes[7].clone(), nodes[start].clone()])
                    .unwrap();
                (kb.query(&forward), kb.query(&backward))
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (true, false));
    }
}

#[test]
fn test_answer_exports_to_json() {
    let mut kb = KnowledgeBase::new();
    let pair = kb.functor("pair");
    let a = kb.constant("a");
    kb.add_fact(pair.apply([a, Term::list([Term::Integer(1)])]).unwrap());

    let x = kb.variable("X");
    let y = kb.variable("Y");
    let answer = kb.ask(&pair.apply([x.into(), y.into()]).unwrap()).unwrap();
    let json = AnswerJson::from_answer(&answer, kb.interner()).to_json().unwrap();

    assert_eq!(
        json,
        concat!(
            r#"{"bindings":["#,
            r#"{"variable":"X","value":{"type":"Constant","name":"a"}},"#,
            r#"{"variable":"Y","value":{"type":"List","items":[{"type":"Integer","value":1}]}}"#,
            r#"]}"#
        )
    );
}
