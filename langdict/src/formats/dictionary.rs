//! Support for the CXone Expert custom dictionary XML document.
//!
//! Shape:
//!
//! ```xml
//! <script type="text/xml">
//!    <dictionaries>
//!       <dictionary language="en">
//!          <term>
//!             <key>greeting</key>
//!             <value>hello</value>
//!          </term>
//!       </dictionary>
//!    </dictionaries>
//! </script>
//! ```
//!
//! Written with a three-space indent and no XML declaration. Duplicate terms
//! are kept: duplicate detection only reports.

use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use crate::{
    classifier::Classification, error::Error, group::LanguageGroup, traits::Parser,
};

const INDENT_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DictionaryDocument {
    pub dictionaries: Vec<Dictionary>,
}

/// All terms for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    pub language: String,
    pub terms: Vec<DictionaryTerm>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DictionaryTerm {
    pub key: String,
    pub value: String,
}

impl Dictionary {
    pub fn new(language: impl Into<String>) -> Self {
        Dictionary {
            language: language.into(),
            terms: Vec::new(),
        }
    }
}

impl DictionaryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// One dictionary per group, in group order; terms in input order.
    pub fn from_groups(groups: &[LanguageGroup]) -> Self {
        DictionaryDocument {
            dictionaries: groups
                .iter()
                .map(|group| Dictionary {
                    language: group.language_code().to_string(),
                    terms: group
                        .entries()
                        .map(|(key, value)| DictionaryTerm {
                            key: key.to_string(),
                            value: value.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn dictionary(&self, language: &str) -> Option<&Dictionary> {
        self.dictionaries.iter().find(|d| d.language == language)
    }

    /// Appends a term to the dictionary for `language`, creating it on first use.
    pub fn add_term(
        &mut self,
        language: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let term = DictionaryTerm {
            key: key.into(),
            value: value.into(),
        };
        match self.dictionaries.iter_mut().find(|d| d.language == language) {
            Some(dictionary) => dictionary.terms.push(term),
            None => {
                let mut dictionary = Dictionary::new(language);
                dictionary.terms.push(term);
                self.dictionaries.push(dictionary);
            }
        }
    }

    pub fn term_count(&self) -> usize {
        self.dictionaries.iter().map(|d| d.terms.len()).sum()
    }
}

impl From<&Classification> for DictionaryDocument {
    fn from(value: &Classification) -> Self {
        DictionaryDocument::from_groups(&value.groups)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Key,
    Value,
}

impl Parser for DictionaryDocument {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        let mut buf = Vec::new();

        let mut document = DictionaryDocument::new();
        let mut dictionary: Option<Dictionary> = None;
        let mut term: Option<DictionaryTerm> = None;
        let mut field: Option<Field> = None;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"dictionary" => dictionary = Some(Dictionary::new(language_attribute(e)?)),
                    b"term" => {
                        if dictionary.is_none() {
                            return Err(Error::InvalidDocument(
                                "term outside of a dictionary".to_string(),
                            ));
                        }
                        term = Some(DictionaryTerm::default());
                    }
                    b"key" => field = Some(Field::Key),
                    b"value" => field = Some(Field::Value),
                    _ => {}
                },
                Event::Empty(ref e) => match e.name().as_ref() {
                    b"dictionary" => document
                        .dictionaries
                        .push(Dictionary::new(language_attribute(e)?)),
                    b"term" => match dictionary.as_mut() {
                        Some(d) => d.terms.push(DictionaryTerm::default()),
                        None => {
                            return Err(Error::InvalidDocument(
                                "term outside of a dictionary".to_string(),
                            ));
                        }
                    },
                    _ => {}
                },
                Event::Text(e) => {
                    if let (Some(field), Some(term)) = (field, term.as_mut()) {
                        let text = e.unescape()?;
                        match field {
                            Field::Key => term.key.push_str(&text),
                            Field::Value => term.value.push_str(&text),
                        }
                    }
                }
                Event::End(ref e) => match e.name().as_ref() {
                    b"key" | b"value" => field = None,
                    b"term" => {
                        if let (Some(d), Some(t)) = (dictionary.as_mut(), term.take()) {
                            d.terms.push(t);
                        }
                    }
                    b"dictionary" => {
                        if let Some(d) = dictionary.take() {
                            document.dictionaries.push(d);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(document)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        {
            let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', INDENT_SIZE);

            let mut script = BytesStart::new("script");
            script.push_attribute(("type", "text/xml"));
            xml_writer.write_event(Event::Start(script))?;
            xml_writer.write_event(Event::Start(BytesStart::new("dictionaries")))?;

            for dictionary in &self.dictionaries {
                let mut elem = BytesStart::new("dictionary");
                elem.push_attribute(("language", dictionary.language.as_str()));
                xml_writer.write_event(Event::Start(elem))?;

                for term in &dictionary.terms {
                    xml_writer.write_event(Event::Start(BytesStart::new("term")))?;
                    write_text_element(&mut xml_writer, "key", &term.key)?;
                    write_text_element(&mut xml_writer, "value", &term.value)?;
                    xml_writer.write_event(Event::End(BytesEnd::new("term")))?;
                }

                xml_writer.write_event(Event::End(BytesEnd::new("dictionary")))?;
            }

            xml_writer.write_event(Event::End(BytesEnd::new("dictionaries")))?;
            xml_writer.write_event(Event::End(BytesEnd::new("script")))?;
        }
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Error> {
    xml_writer.write_event(Event::Start(BytesStart::new(name)))?;
    xml_writer.write_event(Event::Text(BytesText::new(text)))?;
    xml_writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn language_attribute(e: &BytesStart<'_>) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == b"language" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::InvalidDocument(
        "dictionary element missing 'language'".to_string(),
    ))
}
