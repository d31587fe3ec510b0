//! JSON serialization types for terms and answers

use crate::knowledge_base::Answer;
use crate::logic::{Clause, Interner, List, Term};
use serde::{Deserialize, Serialize};

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Variable { name: String },
    Constant { name: String },
    Integer { value: i64 },
    Compound { name: String, args: Vec<TermJson> },
    /// A list; `tail` is set only for partial lists such as `[a|T]`
    List {
        items: Vec<TermJson>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tail: Option<Box<TermJson>>,
    },
    Predicate {
        relation: String,
        left: Box<TermJson>,
        right: Box<TermJson>,
    },
}

impl TermJson {
    pub fn from_term(term: &Term, interner: &Interner) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable {
                name: v.name(interner).to_string(),
            },
            Term::Constant(c) => TermJson::Constant {
                name: c.name(interner).to_string(),
            },
            Term::Integer(value) => TermJson::Integer { value: *value },
            Term::Compound(c) => TermJson::Compound {
                name: c.functor().name(interner).to_string(),
                args: c.args().iter().map(|t| TermJson::from_term(t, interner)).collect(),
            },
            Term::List(list) => Self::from_list(list, interner),
            Term::Predicate(p) => TermJson::Predicate {
                relation: p.relation().name().to_string(),
                left: Box::new(TermJson::from_term(p.left(), interner)),
                right: Box::new(TermJson::from_term(p.right(), interner)),
            },
        }
    }

    fn from_list(list: &List, interner: &Interner) -> Self {
        let mut items = Vec::new();
        let mut current = list;
        let tail = loop {
            match current {
                List::Empty => break None,
                List::Cons(cell) => {
                    items.push(TermJson::from_term(&cell.head, interner));
                    match &cell.tail {
                        Term::List(next) => current = next,
                        other => break Some(Box::new(TermJson::from_term(other, interner))),
                    }
                }
            }
        };
        TermJson::List { items, tail }
    }
}

/// JSON representation of a clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseJson {
    pub head: TermJson,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub body: Vec<TermJson>,
}

impl ClauseJson {
    pub fn from_clause(clause: &Clause, interner: &Interner) -> Self {
        ClauseJson {
            head: TermJson::from_term(&clause.head, interner),
            body: clause.body.iter().map(|t| TermJson::from_term(t, interner)).collect(),
        }
    }
}

/// JSON representation of one goal variable's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingJson {
    pub variable: String,
    pub value: TermJson,
}

/// JSON representation of an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerJson {
    pub bindings: Vec<BindingJson>,
}

impl AnswerJson {
    pub fn from_answer(answer: &Answer, interner: &Interner) -> Self {
        AnswerJson {
            bindings: answer
                .iter()
                .map(|(var, term)| BindingJson {
                    variable: var.name(interner).to_string(),
                    value: TermJson::from_term(term, interner),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KnowledgeBase;
    use crate::logic::Relation;
    use serde_json::json;

    #[test]
    fn test_term_json_shapes() {
        let mut kb = KnowledgeBase::new();
        let f = kb.functor("f");
        let a = kb.constant("a");
        let t = kb.variable("T");
        let term = f
            .apply([
                a.clone(),
                List::with_tail([a.clone(), Term::Integer(1)], t.into()),
                Relation::less_than().apply(1i64, 2i64),
            ])
            .unwrap();

        let value = serde_json::to_value(TermJson::from_term(&term, kb.interner())).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Compound",
                "name": "f",
                "args": [
                    {"type": "Constant", "name": "a"},
                    {
                        "type": "List",
                        "items": [{"type": "Constant", "name": "a"}, {"type": "Integer", "value": 1}],
                        "tail": {"type": "Variable", "name": "T"}
                    },
                    {
                        "type": "Predicate",
                        "relation": "<",
                        "left": {"type": "Integer", "value": 1},
                        "right": {"type": "Integer", "value": 2}
                    }
                ]
            })
        );
    }

    #[test]
    fn test_proper_list_has_no_tail() {
        let kb = KnowledgeBase::new();
        let list = Term::list([Term::Integer(1), Term::Integer(2)]);
        let value = serde_json::to_value(TermJson::from_term(&list, kb.interner())).unwrap();
        assert_eq!(value["items"].as_array().map(Vec::len), Some(2));
        assert!(value.get("tail").is_none());
    }

    #[test]
    fn test_answer_json() {
        let mut kb = KnowledgeBase::new();
        let father = kb.functor("father");
        let abraham = kb.constant("abraham");
        let isaac = kb.constant("isaac");
        kb.add_fact(father.apply([abraham, isaac.clone()]).unwrap());

        let x = kb.variable("X");
        let answer = kb.ask(&father.apply([x.into(), isaac]).unwrap()).unwrap();
        let rendered = AnswerJson::from_answer(&answer, kb.interner()).to_json().unwrap();
        assert_eq!(
            rendered,
            r#"{"bindings":[{"variable":"X","value":{"type":"Constant","name":"abraham"}}]}"#
        );

        let parsed: AnswerJson = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.bindings[0].variable, "X");
    }

    #[test]
    fn test_clause_json_omits_empty_body() {
        let mut kb = KnowledgeBase::new();
        let male = kb.functor("male");
        let isaac = kb.constant("isaac");
        let fact = Clause::fact(male.apply([isaac]).unwrap());
        let value = serde_json::to_value(ClauseJson::from_clause(&fact, kb.interner())).unwrap();
        assert!(value.get("body").is_none());
    }
}
