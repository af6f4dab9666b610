//! URI templates for link targets
//!
//! Supports the subset of RFC 6570 used by REST affordances: simple string
//! expansion `{id}`, reserved expansion `{+path}`, form-style query
//! expansion `{?a,b}` and query continuation `{&c}`.

use crate::error::{AffordanceError, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
	Simple,
	Reserved,
	Query,
	Continuation,
}

impl Operator {
	fn prefix(self) -> &'static str {
		match self {
			Operator::Simple => "",
			Operator::Reserved => "+",
			Operator::Query => "?",
			Operator::Continuation => "&",
		}
	}

	fn is_query(self) -> bool {
		matches!(self, Operator::Query | Operator::Continuation)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
	Literal(String),
	Expression {
		operator: Operator,
		variables: Vec<String>,
	},
}

/// How unresolved template expressions are treated during expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSupport {
	/// The target format can carry templates: keep unresolved expressions
	Preserve,
	/// The target format cannot: drop unresolved query expressions, fail on
	/// unresolved path expressions
	Omit,
}

/// Result of expanding a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
	pub href: String,
	/// Whether unresolved expressions remain in `href`
	pub templated: bool,
}

/// A parsed URI template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
	source: String,
	parts: Vec<Part>,
}

impl UriTemplate {
	/// Parse a template
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::UriTemplate;
	///
	/// let template = UriTemplate::parse("/events/{id}{?expand}").unwrap();
	/// assert_eq!(template.variables().collect::<Vec<_>>(), vec!["id", "expand"]);
	/// assert!(UriTemplate::parse("/events/{id").is_err());
	/// ```
	pub fn parse(source: impl Into<String>) -> Result<Self> {
		let source = source.into();
		let invalid = |reason: &str| AffordanceError::InvalidTemplate {
			template: source.clone(),
			reason: reason.to_string(),
		};

		let mut parts = Vec::new();
		let mut literal = String::new();
		let mut chars = source.chars();
		while let Some(ch) = chars.next() {
			match ch {
				'{' => {
					let mut body = String::new();
					let mut closed = false;
					for inner in chars.by_ref() {
						match inner {
							'}' => {
								closed = true;
								break;
							}
							'{' => return Err(invalid("nested expression")),
							other => body.push(other),
						}
					}
					if !closed {
						return Err(invalid("unclosed expression"));
					}
					if !literal.is_empty() {
						parts.push(Part::Literal(std::mem::take(&mut literal)));
					}
					parts.push(Self::parse_expression(&body).map_err(|reason| invalid(&reason))?);
				}
				'}' => return Err(invalid("unmatched closing brace")),
				other => literal.push(other),
			}
		}
		if !literal.is_empty() {
			parts.push(Part::Literal(literal));
		}
		Ok(Self { source, parts })
	}

	fn parse_expression(body: &str) -> std::result::Result<Part, String> {
		let (operator, names) = match body.chars().next() {
			Some('+') => (Operator::Reserved, &body[1..]),
			Some('?') => (Operator::Query, &body[1..]),
			Some('&') => (Operator::Continuation, &body[1..]),
			Some(op @ ('#' | '.' | '/' | ';' | '=' | ',' | '!' | '@' | '|')) => {
				return Err(format!("operator `{}` is not supported", op));
			}
			Some(_) => (Operator::Simple, body),
			None => return Err("empty expression".to_string()),
		};

		let mut variables = Vec::new();
		for name in names.split(',') {
			// Explode modifiers do not change single-valued expansion
			let name = name.trim().trim_end_matches('*');
			if name.is_empty() {
				return Err("empty variable name".to_string());
			}
			if !name
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
			{
				return Err(format!("invalid variable name `{}`", name));
			}
			variables.push(name.to_string());
		}
		Ok(Part::Expression {
			operator,
			variables,
		})
	}

	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// Whether the template contains any expression
	pub fn is_templated(&self) -> bool {
		self.parts
			.iter()
			.any(|p| matches!(p, Part::Expression { .. }))
	}

	/// All variable names in order of appearance
	pub fn variables(&self) -> impl Iterator<Item = &str> {
		self.expressions().flat_map(|(_, vars)| vars.iter().map(String::as_str))
	}

	/// Variables that expand into the path
	pub fn path_variables(&self) -> impl Iterator<Item = &str> {
		self.expressions()
			.filter(|(op, _)| !op.is_query())
			.flat_map(|(_, vars)| vars.iter().map(String::as_str))
	}

	/// Variables that expand into the query string
	pub fn query_variables(&self) -> impl Iterator<Item = &str> {
		self.expressions()
			.filter(|(op, _)| op.is_query())
			.flat_map(|(_, vars)| vars.iter().map(String::as_str))
	}

	fn expressions(&self) -> impl Iterator<Item = (Operator, &Vec<String>)> {
		self.parts.iter().filter_map(|part| match part {
			Part::Expression {
				operator,
				variables,
			} => Some((*operator, variables)),
			Part::Literal(_) => None,
		})
	}

	/// Expand the template, looking variable values up with `lookup`
	///
	/// # Examples
	///
	/// ```
	/// use affordance_core::{TemplateSupport, UriTemplate};
	///
	/// let template = UriTemplate::parse("/events/{id}{?name,city}").unwrap();
	/// let lookup = |var: &str| (var == "id").then(|| "1".to_string());
	///
	/// let kept = template.expand(lookup, TemplateSupport::Preserve).unwrap();
	/// assert_eq!(kept.href, "/events/1{?name,city}");
	/// assert!(kept.templated);
	///
	/// let dropped = template.expand(lookup, TemplateSupport::Omit).unwrap();
	/// assert_eq!(dropped.href, "/events/1");
	/// assert!(!dropped.templated);
	/// ```
	pub fn expand<F>(&self, lookup: F, support: TemplateSupport) -> Result<Expansion>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut href = String::with_capacity(self.source.len());
		let mut templated = false;
		let mut query_started = false;

		for part in &self.parts {
			match part {
				Part::Literal(text) => {
					query_started |= text.contains('?');
					href.push_str(text);
				}
				Part::Expression {
					operator,
					variables,
				} if operator.is_query() => {
					let mut unresolved = Vec::new();
					for name in variables {
						match lookup(name) {
							Some(value) => {
								href.push(if query_started { '&' } else { '?' });
								query_started = true;
								href.push_str(name);
								href.push('=');
								href.push_str(&percent_encode(&value, false));
							}
							None => unresolved.push(name.as_str()),
						}
					}
					if unresolved.is_empty() {
						continue;
					}
					match support {
						TemplateSupport::Preserve => {
							let op = if query_started { '&' } else { '?' };
							href.push_str(&format!("{{{}{}}}", op, unresolved.join(",")));
							query_started = true;
							templated = true;
						}
						TemplateSupport::Omit => {
							tracing::warn!(
								template = %self.source,
								variables = ?unresolved,
								"dropping unresolved query variables"
							);
						}
					}
				}
				Part::Expression {
					operator,
					variables,
				} => {
					let values: Vec<Option<String>> =
						variables.iter().map(|name| lookup(name)).collect();
					if let Some(missing) = values.iter().position(Option::is_none) {
						match support {
							TemplateSupport::Preserve => {
								href.push_str(&format!(
									"{{{}{}}}",
									operator.prefix(),
									variables.join(",")
								));
								templated = true;
								continue;
							}
							TemplateSupport::Omit => {
								return Err(AffordanceError::UnboundPathVariable {
									variable: variables[missing].clone(),
									template: self.source.clone(),
								});
							}
						}
					}
					let reserved = *operator == Operator::Reserved;
					let encoded: Vec<String> = values
						.into_iter()
						.flatten()
						.map(|value| percent_encode(&value, reserved))
						.collect();
					let expanded = encoded.join(",");
					query_started |= reserved && expanded.contains('?');
					href.push_str(&expanded);
				}
			}
		}

		Ok(Expansion { href, templated })
	}
}

/// Everything outside the RFC 3986 unreserved set
const SIMPLE: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// Unreserved plus reserved characters; `%` is still encoded
const RESERVED: &AsciiSet = &SIMPLE
	.remove(b':')
	.remove(b'/')
	.remove(b'?')
	.remove(b'#')
	.remove(b'[')
	.remove(b']')
	.remove(b'@')
	.remove(b'!')
	.remove(b'$')
	.remove(b'&')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')')
	.remove(b'*')
	.remove(b'+')
	.remove(b',')
	.remove(b';')
	.remove(b'=');

fn percent_encode(value: &str, allow_reserved: bool) -> String {
	if !allow_reserved {
		return utf8_percent_encode(value, SIMPLE).to_string();
	}

	// Reserved expansion keeps existing `%XX` triplets and encodes stray `%`
	let mut out = String::with_capacity(value.len());
	let mut rest = value;
	while let Some(pos) = rest.find('%') {
		out.extend(utf8_percent_encode(&rest[..pos], RESERVED));
		let tail = &rest[pos..];
		let bytes = tail.as_bytes();
		if bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit() {
			out.push_str(&tail[..3]);
			rest = &tail[3..];
		} else {
			out.push_str("%25");
			rest = &tail[1..];
		}
	}
	out.extend(utf8_percent_encode(rest, RESERVED));
	out
}

impl fmt::Display for UriTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.source)
	}
}

impl Serialize for UriTemplate {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.source)
	}
}

impl<'de> Deserialize<'de> for UriTemplate {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		let source = String::deserialize(deserializer)?;
		UriTemplate::parse(source).map_err(serde::de::Error::custom)
	}
}
