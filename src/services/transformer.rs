//! Normalization of raw upstream entities into display records.
//!
//! Every function here is total: missing or oddly-typed source fields resolve
//! to empty values instead of errors.
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

use crate::models::{Category, DisplayRecord, RawEntity, Tag};
use crate::services::extra_data::{self, ExtraData};

/// Where-to-watch listings are kept whole; every other external source only
/// contributes its first record.
const WHERE_TO_WATCH: &str = "where_to_watch";
const GOODREADS: &str = "goodreads";
const GENRE_TAG: &str = "genre";

static HTML_TAG: OnceLock<Regex> = OnceLock::new();
static YEAR_PREFIX: OnceLock<Regex> = OnceLock::new();

fn html_tag() -> &'static Regex {
    HTML_TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid HTML tag pattern"))
}

fn year_prefix() -> &'static Regex {
    YEAR_PREFIX.get_or_init(|| Regex::new(r"^\d{4},\s*(.*)").expect("valid year prefix pattern"))
}

/// Transform a raw entity for the given category
pub fn transform(entity: &RawEntity, category: Category) -> DisplayRecord {
    for_category(category)(entity)
}

/// Transformer used for a category
pub fn for_category(category: Category) -> fn(&RawEntity) -> DisplayRecord {
    match category {
        Category::Movies | Category::TvShows => transform_screen,
        Category::Books => transform_book,
        Category::Places => transform_place,
    }
}

/// Removes anything that looks like an HTML tag from string values.
/// Other JSON values are returned unchanged.
pub fn strip_html(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(html_tag().replace_all(text, "").into_owned()),
        other => other.clone(),
    }
}

/// First four characters of a date-like string
pub fn year_of(date: Option<&str>) -> String {
    date.unwrap_or_default().chars().take(4).collect()
}

/// Name of the first tag typed `genre`
pub fn first_genre(tags: &[Tag]) -> Option<String> {
    tags.iter()
        .find(|tag| tag.kind == GENRE_TAG)
        .map(|tag| tag.name.clone())
}

/// Book disambiguations look like `"1925, F. Scott Fitzgerald"`; the year
/// prefix is dropped when present.
pub fn author_from_disambiguation(disambiguation: &str) -> String {
    match year_prefix().captures(disambiguation) {
        Some(caps) => caps
            .get(1)
            .map(|author| author.as_str().to_string())
            .unwrap_or_default(),
        None => disambiguation.to_string(),
    }
}

fn popularity(entity: &RawEntity) -> Value {
    entity.popularity.map(Value::from).unwrap_or(Value::Null)
}

fn base_record(entity: &RawEntity, date: Option<&str>, extra: &ExtraData) -> DisplayRecord {
    let props = &entity.properties;

    DisplayRecord {
        id: entity.id.clone(),
        title: entity.name.clone(),
        release_date_year: year_of(date),
        description: props
            .description
            .as_ref()
            .map(strip_html)
            .unwrap_or_else(|| Value::String(String::new())),
        genre: first_genre(&entity.tags),
        author: None,
        image: props.image.clone().unwrap_or_else(|| json!({})),
        tags: entity.tags.clone(),
        extra_data: extra_data::render(extra),
        action: entity.action.clone(),
        context: entity.context.clone().unwrap_or_default(),
    }
}

/// Movies and TV shows
pub fn transform_screen(entity: &RawEntity) -> DisplayRecord {
    let props = &entity.properties;
    let mut extra = ExtraData::new();
    extra.insert(
        "duration".into(),
        props.duration.clone().unwrap_or(Value::Null),
    );
    extra.insert(
        "content_rating".into(),
        props.content_rating.clone().unwrap_or(Value::Null),
    );
    extra.insert("popularity".into(), popularity(entity));

    for (source, records) in &entity.external {
        let value = if source == WHERE_TO_WATCH {
            records.clone()
        } else {
            entity.first_external(source).cloned().unwrap_or(Value::Null)
        };
        extra.insert(source.clone(), value);
    }

    base_record(entity, props.release_date.as_deref(), &extra)
}

pub fn transform_book(entity: &RawEntity) -> DisplayRecord {
    let props = &entity.properties;
    let mut extra = ExtraData::new();
    extra.insert(
        "publisher".into(),
        props.publisher.clone().unwrap_or(Value::Null),
    );
    extra.insert(
        "page_count".into(),
        props.page_count.clone().unwrap_or(Value::Null),
    );
    extra.insert("popularity".into(), popularity(entity));
    extra.insert(
        GOODREADS.into(),
        entity.first_external(GOODREADS).cloned().unwrap_or(Value::Null),
    );

    let date = props
        .publication_date
        .as_deref()
        .or(props.release_date.as_deref());

    DisplayRecord {
        author: props
            .disambiguation
            .as_deref()
            .map(author_from_disambiguation),
        ..base_record(entity, date, &extra)
    }
}

pub fn transform_place(entity: &RawEntity) -> DisplayRecord {
    let props = &entity.properties;
    let mut extra = ExtraData::new();
    for (key, value) in [
        ("address", &props.address),
        ("phone", &props.phone),
        ("website", &props.website),
        ("business_rating", &props.business_rating),
    ] {
        extra.insert(key.into(), value.clone().unwrap_or(Value::Null));
    }
    extra.insert("popularity".into(), popularity(entity));

    base_record(entity, None, &extra)
}
