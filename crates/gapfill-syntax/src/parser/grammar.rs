//! # Grammar Rules
//!
//! One function per production. Each receives the parser positioned at the
//! first token it owns and leaves it just past the last one.
//!
//! ```text
//! document    := (task | TEXT)* EOF
//! task        := '<' "task" attribute* '>' taskContent '</' "task" '>'
//! taskContent := (gapTag | extraTag | TEXT)*
//! gapTag      := '<' "gap" attribute* '>' TEXT '</' "gap" '>'
//! extraTag    := '<' "extra" attribute* '>' TEXT '</' "extra" '>'
//! attribute   := IDENTIFIER '=' QUOTED
//! ```
//!
//! The opening `<` of a tag is consumed by the caller, which needs it to
//! decide between alternatives.

use std::collections::BTreeMap;

use crate::document::{Document, ParsedGap, ParsedTask, TaskElement};
use crate::parser::{ParseError, Parser};
use crate::token::{Token, TokenKind};

type Attributes = BTreeMap<String, String>;

pub(super) fn document<I: Iterator<Item = char>>(
    p: &mut Parser<I>,
) -> Result<Document, ParseError> {
    let mut doc = Document::default();

    loop {
        match p.bump()? {
            Token::TagStart => doc.tasks.push(task(p)?),
            // Text between tasks carries no meaning.
            Token::Text(_) => {}
            Token::EndOfFile => return Ok(doc),
            found => return Err(ParseError::UnexpectedTopLevel { found }),
        }
    }
}

fn task<I: Iterator<Item = char>>(p: &mut Parser<I>) -> Result<ParsedTask, ParseError> {
    let mut task = ParsedTask::default();

    p.expect_keyword("task")?;
    attributes(p)?;
    p.expect(TokenKind::TagEnd)?;

    task_content(p, &mut task)?;

    closing_tag(p, "task")?;
    Ok(task)
}

fn task_content<I: Iterator<Item = char>>(
    p: &mut Parser<I>,
    task: &mut ParsedTask,
) -> Result<(), ParseError> {
    loop {
        match p.peek()?.kind() {
            TokenKind::TagStart => {
                p.bump()?;
                let name = match p.peek()? {
                    Token::Identifier(name) => name.clone(),
                    found => {
                        return Err(ParseError::UnexpectedToken {
                            expected: TokenKind::Identifier,
                            found: found.clone(),
                        });
                    }
                };
                match name.as_str() {
                    "gap" => task.content.push(TaskElement::Gap(gap(p)?)),
                    "extra" => task.extra.push(extra(p)?),
                    _ => return Err(ParseError::UnexpectedTag { found: name }),
                }
            }
            TokenKind::Text => {
                let text = p.expect_text(TokenKind::Text)?;
                task.content.push(TaskElement::Text(text));
            }
            _ => return Ok(()),
        }
    }
}

fn gap<I: Iterator<Item = char>>(p: &mut Parser<I>) -> Result<ParsedGap, ParseError> {
    p.expect_keyword("gap")?;
    let mut attrs = attributes(p)?;
    p.expect(TokenKind::TagEnd)?;

    let answer = p.expect_text(TokenKind::Text)?;

    closing_tag(p, "gap")?;
    Ok(ParsedGap {
        img: attrs.remove("img"),
        answer,
    })
}

fn extra<I: Iterator<Item = char>>(p: &mut Parser<I>) -> Result<String, ParseError> {
    p.expect_keyword("extra")?;
    attributes(p)?;
    p.expect(TokenKind::TagEnd)?;

    let phrase = p.expect_text(TokenKind::Text)?;

    closing_tag(p, "extra")?;
    Ok(phrase)
}

fn closing_tag<I: Iterator<Item = char>>(
    p: &mut Parser<I>,
    name: &'static str,
) -> Result<(), ParseError> {
    p.expect(TokenKind::ClosingTagStart)?;
    p.expect_keyword(name)?;
    p.expect(TokenKind::TagEnd)?;
    Ok(())
}

/// Later duplicates of an attribute win.
fn attributes<I: Iterator<Item = char>>(p: &mut Parser<I>) -> Result<Attributes, ParseError> {
    let mut attrs = Attributes::new();

    while p.at(TokenKind::Identifier)? {
        let name = p.expect_text(TokenKind::Identifier)?;
        p.expect(TokenKind::Equals)?;
        let value = p.expect_text(TokenKind::Quoted)?;
        attrs.insert(name, value);
    }

    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use crate::document::{Document, ParsedGap, ParsedTask, TaskElement};
    use crate::parser::{ParseError, parse};
    use crate::token::{Token, TokenKind};
    use crate::tokenizer::LexError;
    use insta::assert_debug_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> TaskElement {
        TaskElement::Text(s.to_string())
    }

    fn gap(answer: &str, img: Option<&str>) -> TaskElement {
        TaskElement::Gap(ParsedGap {
            img: img.map(str::to_string),
            answer: answer.to_string(),
        })
    }

    #[test]
    fn single_gap_with_trailing_text() {
        let doc = parse("<task><gap>red</gap> apple</task>").unwrap();
        assert_eq!(
            doc,
            Document {
                tasks: vec![ParsedTask {
                    content: vec![gap("red", None), text(" apple")],
                    extra: vec![],
                }],
            }
        );
    }

    #[test]
    fn empty_input_is_an_empty_document() {
        assert_eq!(parse("").unwrap(), Document::default());
        assert!(parse("just some prose").unwrap().is_empty());
    }

    #[test]
    fn gap_image_and_extras() {
        let doc = parse(
            r#"<task title="ignored">The <gap img="cat.png">cat</gap> sat.<extra>dog</extra><extra>hat</extra></task>"#,
        )
        .unwrap();

        let task = &doc.tasks[0];
        assert_eq!(
            task.content,
            vec![text("The "), gap("cat", Some("cat.png")), text(" sat.")]
        );
        assert_eq!(task.extra, vec!["dog".to_string(), "hat".to_string()]);
        assert_eq!(task.gaps().count(), 1);
    }

    #[test]
    fn multiple_tasks_keep_order() {
        let doc = parse(
            "intro\n<task><gap>one</gap></task>\nbetween\n<task><gap>two</gap></task>\n",
        )
        .unwrap();
        let answers: Vec<_> = doc
            .tasks
            .iter()
            .flat_map(|t| t.gaps().map(|g| g.answer.clone()))
            .collect();
        assert_eq!(answers, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn last_duplicate_attribute_wins() {
        let doc = parse(r#"<task><gap img="a.png" img="b.png">x</gap></task>"#).unwrap();
        assert_eq!(doc.tasks[0].content, vec![gap("x", Some("b.png"))]);
    }

    #[test]
    fn document_snapshot() {
        let doc = parse(
            "<task>I <gap>like</gap> &lt;tea&gt;.<extra>hate</extra></task>",
        )
        .unwrap();
        assert_debug_snapshot!(doc, @r#"
        Document {
            tasks: [
                ParsedTask {
                    content: [
                        Text(
                            "I ",
                        ),
                        Gap(
                            ParsedGap {
                                img: None,
                                answer: "like",
                            },
                        ),
                        Text(
                            " <tea>.",
                        ),
                    ],
                    extra: [
                        "hate",
                    ],
                },
            ],
        }
        "#);
    }

    #[rstest]
    #[case::unknown_tag(
        "<task><blank>x</blank></task>",
        ParseError::UnexpectedTag { found: "blank".to_string() }
    )]
    #[case::wrong_top_level_keyword(
        "<gap>x</gap>",
        ParseError::UnexpectedIdentifier { expected: "task", found: "gap".to_string() }
    )]
    #[case::stray_closing_tag(
        "</task>",
        ParseError::UnexpectedTopLevel { found: Token::ClosingTagStart }
    )]
    #[case::missing_closing_task(
        "<task><gap>x</gap>",
        ParseError::UnexpectedToken { expected: TokenKind::ClosingTagStart, found: Token::EndOfFile }
    )]
    #[case::mismatched_closing_tag(
        "<task><gap>x</extra></task>",
        ParseError::UnexpectedIdentifier { expected: "gap", found: "extra".to_string() }
    )]
    #[case::empty_gap(
        "<task><gap></gap></task>",
        ParseError::UnexpectedToken { expected: TokenKind::Text, found: Token::ClosingTagStart }
    )]
    #[case::attribute_without_value(
        "<task><gap img>x</gap></task>",
        ParseError::UnexpectedToken { expected: TokenKind::Equals, found: Token::TagEnd }
    )]
    #[case::unquoted_attribute(
        "<task><gap img=x>x</gap></task>",
        ParseError::UnexpectedToken {
            expected: TokenKind::Quoted,
            found: Token::Identifier("x".to_string()),
        }
    )]
    #[case::tag_without_name(
        "<task><>x</task>",
        ParseError::UnexpectedToken { expected: TokenKind::Identifier, found: Token::TagEnd }
    )]
    #[case::lexical_error(
        "<task>&bogus;</task>",
        ParseError::Lex(LexError::InvalidEntity("bogus".to_string()))
    )]
    fn syntax_errors(#[case] input: &str, #[case] expected: ParseError) {
        assert_eq!(parse(input).unwrap_err(), expected);
    }
}
