// src/portfolio/models.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::common::helpers::{serialize_flag, serialize_json_column, serialize_json_list};
use crate::common::validation::{
    form_json_text, form_text, non_blank, parse_date, parse_date_value, parse_leading_int,
    split_comma_list, split_line_list, FormFields, OrderValue,
};
use crate::common::{sanitize_input, sanitize_opt};

// ---- Stored rows ----

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "serialize_json_list")]
    pub tech: Option<String>,
    #[serde(serialize_with = "serialize_json_list")]
    pub links: Option<String>,
    pub image: Option<String>,
    #[serde(serialize_with = "serialize_json_list")]
    pub gallery: Option<String>,
    pub project_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub role: Option<String>,
    pub team_size: Option<i64>,
    #[serde(serialize_with = "serialize_json_list")]
    pub categories: Option<String>,
    #[serde(serialize_with = "serialize_flag")]
    pub is_visible: i64,
    #[sqlx(rename = "display_order")]
    #[serde(rename = "order")]
    pub order: i64,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Experience {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(serialize_with = "serialize_flag")]
    pub is_current: i64,
    pub duration: Option<String>,
    #[serde(serialize_with = "serialize_json_list")]
    pub responsibilities: Option<String>,
    #[serde(serialize_with = "serialize_json_list")]
    pub achievements: Option<String>,
    #[serde(serialize_with = "serialize_json_list")]
    pub technologies: Option<String>,
    pub color: Option<String>,
    #[sqlx(rename = "display_order")]
    #[serde(rename = "order")]
    pub order: i64,
    #[serde(serialize_with = "serialize_flag")]
    pub is_visible: i64,
    pub created_at: Option<String>,
}

impl Experience {
    /// `MM/YYYY - MM/YYYY`, with `Present` for a current position
    pub fn period(&self) -> String {
        let start = month_year(self.start_date.as_deref());
        let end = if self.is_current != 0 {
            "Present".to_string()
        } else {
            month_year(self.end_date.as_deref())
        };
        format!("{} - {}", start, end)
    }
}

fn month_year(date: Option<&str>) -> String {
    date.and_then(parse_date)
        .map(|d| d.format("%m/%Y").to_string())
        .unwrap_or_default()
}

/// Experience as returned by the API, with the derived period
#[derive(Debug, Serialize)]
pub struct ExperienceView {
    #[serde(flatten)]
    pub experience: Experience,
    pub period: String,
}

impl From<Experience> for ExperienceView {
    fn from(experience: Experience) -> Self {
        let period = experience.period();
        Self { experience, period }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TechnicalSkill {
    pub id: i64,
    pub title: String,
    #[serde(serialize_with = "serialize_json_list")]
    pub skills: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    #[sqlx(rename = "display_order")]
    #[serde(rename = "order")]
    pub order: i64,
    #[serde(serialize_with = "serialize_flag")]
    pub is_visible: i64,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Certification {
    pub id: i64,
    pub name: String,
    pub issuer: String,
    pub date: Option<String>,
    pub credential_url: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(serialize_with = "serialize_json_list")]
    pub skills: Option<String>,
    pub certificate_id: Option<String>,
    pub expiration_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct About {
    pub id: i64,
    pub name: String,
    pub headline: Option<String>,
    pub bio: String,
    pub photo: Option<String>,
    pub cover_image: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub resume_url: Option<String>,
    #[serde(serialize_with = "serialize_json_column")]
    pub social_links: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub date: Option<String>,
    pub reading_time: Option<i64>,
    #[serde(serialize_with = "serialize_flag")]
    pub featured: i64,
    #[serde(serialize_with = "serialize_flag")]
    pub is_visible: i64,
    pub author_id: Option<i64>,
}

/// Blog with its author and tags resolved
#[derive(Debug, Serialize)]
pub struct BlogView {
    #[serde(flatten)]
    pub blog: Blog,
    pub author: Option<Author>,
    pub tags: Vec<Tag>,
}

// ---- Forms ----
//
// Every field arrives as text. Validators run on the form; `into_input`
// converts a validated form into native values and escapes free text.

#[derive(Debug, Default, Deserialize)]
pub struct ProjectForm {
    #[serde(default, deserialize_with = "form_text")]
    pub title: String,
    #[serde(default, deserialize_with = "form_text")]
    pub description: String,
    #[serde(default, alias = "tech_stack", deserialize_with = "form_json_text")]
    pub tech: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub links: String,
    #[serde(default, deserialize_with = "form_text")]
    pub image: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub gallery: String,
    #[serde(default, deserialize_with = "form_text")]
    pub project_type: String,
    #[serde(default, deserialize_with = "form_text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "form_text")]
    pub end_date: String,
    #[serde(default, deserialize_with = "form_text")]
    pub role: String,
    #[serde(default, deserialize_with = "form_text")]
    pub team_size: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub categories: String,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub order: Option<OrderValue>,
}

impl FormFields for ProjectForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "tech" => Some(&self.tech),
            "links" => Some(&self.links),
            "image" => Some(&self.image),
            "gallery" => Some(&self.gallery),
            "project_type" => Some(&self.project_type),
            "start_date" => Some(&self.start_date),
            "end_date" => Some(&self.end_date),
            "role" => Some(&self.role),
            "team_size" => Some(&self.team_size),
            "categories" => Some(&self.categories),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub links: Vec<ProjectLink>,
    pub image: Option<String>,
    pub gallery: Vec<String>,
    pub project_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub role: Option<String>,
    pub team_size: Option<i64>,
    pub categories: Vec<String>,
    pub is_visible: Option<bool>,
    pub order: Option<i64>,
}

impl ProjectForm {
    pub fn into_input(self) -> ProjectInput {
        ProjectInput {
            title: sanitize_input(self.title.trim()),
            description: sanitize_input(self.description.trim()),
            tech: escape_all(split_comma_list(&self.tech)),
            links: parse_links(&self.links),
            image: non_blank(&self.image),
            gallery: split_comma_list(&self.gallery),
            project_type: sanitize_opt(non_blank(&self.project_type)),
            start_date: parse_date(&self.start_date),
            end_date: parse_date(&self.end_date),
            role: sanitize_opt(non_blank(&self.role)),
            team_size: parse_leading_int(&self.team_size),
            categories: escape_all(named_list(&self.categories)),
            is_visible: self.is_visible,
            order: self.order.and_then(|o| o.as_int()),
        }
    }
}

/// Links are a JSON array of `{name, url}`; entries without a URL are dropped
fn parse_links(raw: &str) -> Vec<ProjectLink> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let url = item.get("url")?.as_str()?.trim();
            if url.is_empty() {
                return None;
            }
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(url)
                .trim();
            Some(ProjectLink {
                name: sanitize_input(name),
                url: url.to_string(),
            })
        })
        .collect()
}

/// A list given as text, a JSON array of strings, or a JSON array of
/// `{name}` objects
fn named_list(raw: &str) -> Vec<String> {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw.trim()) {
        return items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => non_blank(s),
                Value::Object(_) => item.get("name").and_then(Value::as_str).and_then(non_blank),
                _ => None,
            })
            .collect();
    }
    split_comma_list(raw)
}

fn escape_all(items: Vec<String>) -> Vec<String> {
    items.iter().map(|item| sanitize_input(item)).collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct ExperienceForm {
    #[serde(default, deserialize_with = "form_text")]
    pub title: String,
    #[serde(default, deserialize_with = "form_text")]
    pub company: String,
    #[serde(default, deserialize_with = "form_text")]
    pub location: String,
    #[serde(default, deserialize_with = "form_text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "form_text")]
    pub end_date: String,
    #[serde(default)]
    pub is_current: Option<bool>,
    #[serde(default, deserialize_with = "form_text")]
    pub duration: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub responsibilities: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub achievements: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub technologies: String,
    #[serde(default, deserialize_with = "form_text")]
    pub color: String,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub order: Option<OrderValue>,
}

impl FormFields for ExperienceForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "company" => Some(&self.company),
            "location" => Some(&self.location),
            "start_date" => Some(&self.start_date),
            "end_date" => Some(&self.end_date),
            "duration" => Some(&self.duration),
            "responsibilities" => Some(&self.responsibilities),
            "achievements" => Some(&self.achievements),
            "technologies" => Some(&self.technologies),
            "color" => Some(&self.color),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExperienceInput {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_current: Option<bool>,
    pub duration: Option<String>,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
    pub color: Option<String>,
    pub is_visible: Option<bool>,
    pub order: Option<i64>,
}

impl ExperienceForm {
    pub fn into_input(self) -> ExperienceInput {
        ExperienceInput {
            title: sanitize_input(self.title.trim()),
            company: sanitize_input(self.company.trim()),
            location: sanitize_opt(non_blank(&self.location)),
            start_date: parse_date(&self.start_date),
            end_date: parse_date(&self.end_date),
            is_current: self.is_current,
            duration: sanitize_opt(non_blank(&self.duration)),
            responsibilities: escape_all(split_line_list(&self.responsibilities)),
            achievements: escape_all(split_line_list(&self.achievements)),
            technologies: escape_all(split_comma_list(&self.technologies)),
            color: non_blank(&self.color),
            is_visible: self.is_visible,
            order: self.order.and_then(|o| o.as_int()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TechnicalSkillForm {
    #[serde(default, deserialize_with = "form_text")]
    pub title: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub skills: String,
    #[serde(default, deserialize_with = "form_text")]
    pub color: String,
    #[serde(default, deserialize_with = "form_text")]
    pub icon: String,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub order: Option<OrderValue>,
}

impl FormFields for TechnicalSkillForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "skills" => Some(&self.skills),
            "color" => Some(&self.color),
            "icon" => Some(&self.icon),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TechnicalSkillInput {
    pub title: String,
    pub skills: Vec<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_visible: Option<bool>,
    pub order: Option<i64>,
}

impl TechnicalSkillForm {
    pub fn into_input(self) -> TechnicalSkillInput {
        TechnicalSkillInput {
            title: sanitize_input(self.title.trim()),
            skills: escape_all(split_comma_list(&self.skills)),
            color: non_blank(&self.color),
            icon: sanitize_opt(non_blank(&self.icon)),
            is_visible: self.is_visible,
            order: self.order.and_then(|o| o.as_int()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CertificationForm {
    #[serde(default, deserialize_with = "form_text")]
    pub name: String,
    #[serde(default, deserialize_with = "form_text")]
    pub issuer: String,
    #[serde(default, deserialize_with = "form_text")]
    pub date: String,
    #[serde(default, deserialize_with = "form_text")]
    pub credential_url: String,
    #[serde(default, deserialize_with = "form_text")]
    pub image: String,
    #[serde(default, deserialize_with = "form_text")]
    pub description: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub skills: String,
    #[serde(default, deserialize_with = "form_text")]
    pub certificate_id: String,
    #[serde(default, deserialize_with = "form_text")]
    pub expiration_date: String,
}

impl FormFields for CertificationForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "issuer" => Some(&self.issuer),
            "date" => Some(&self.date),
            "credential_url" => Some(&self.credential_url),
            "image" => Some(&self.image),
            "description" => Some(&self.description),
            "skills" => Some(&self.skills),
            "certificate_id" => Some(&self.certificate_id),
            "expiration_date" => Some(&self.expiration_date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CertificationInput {
    pub name: String,
    pub issuer: String,
    /// Free text, e.g. "March 2024"
    pub date: Option<String>,
    pub credential_url: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub skills: Vec<String>,
    pub certificate_id: Option<String>,
    pub expiration_date: Option<NaiveDate>,
}

impl CertificationForm {
    pub fn into_input(self) -> CertificationInput {
        CertificationInput {
            name: sanitize_input(self.name.trim()),
            issuer: sanitize_input(self.issuer.trim()),
            date: sanitize_opt(non_blank(&self.date)),
            credential_url: non_blank(&self.credential_url),
            image: non_blank(&self.image),
            description: sanitize_opt(non_blank(&self.description)),
            skills: escape_all(named_list(&self.skills)),
            certificate_id: sanitize_opt(non_blank(&self.certificate_id)),
            expiration_date: parse_date(&self.expiration_date),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BlogForm {
    #[serde(default, deserialize_with = "form_text")]
    pub title: String,
    #[serde(default, deserialize_with = "form_text")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "form_text")]
    pub content: String,
    #[serde(default, deserialize_with = "form_text")]
    pub cover_image: String,
    #[serde(default, deserialize_with = "form_text")]
    pub date: String,
    #[serde(default, deserialize_with = "form_text")]
    pub reading_time: String,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default, deserialize_with = "form_json_text")]
    pub tags: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub author: String,
}

impl FormFields for BlogForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "excerpt" => Some(&self.excerpt),
            "content" => Some(&self.content),
            "cover_image" => Some(&self.cover_image),
            "date" => Some(&self.date),
            "reading_time" => Some(&self.reading_time),
            "tags" => Some(&self.tags),
            "author" => Some(&self.author),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorInput {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BlogInput {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    /// Normalized `YYYY-MM-DDTHH:MM:SS`
    pub date: Option<String>,
    pub reading_time: Option<i64>,
    pub featured: Option<bool>,
    pub is_visible: Option<bool>,
    pub tags: Vec<String>,
    pub author: Option<AuthorInput>,
}

impl BlogForm {
    pub fn into_input(self) -> BlogInput {
        let mut tags = escape_all(named_list(&self.tags));
        tags.sort();
        tags.dedup();

        BlogInput {
            title: sanitize_input(self.title.trim()),
            excerpt: sanitize_opt(non_blank(&self.excerpt)),
            content: sanitize_input(self.content.trim()),
            cover_image: non_blank(&self.cover_image),
            date: parse_date_value(&self.date)
                .map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string()),
            reading_time: parse_leading_int(&self.reading_time),
            featured: self.featured,
            is_visible: self.is_visible,
            tags,
            author: parse_author(&self.author),
        }
    }
}

/// The author is a plain name or an object `{name, email}`
fn parse_author(raw: &str) -> Option<AuthorInput> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        let value: Value = serde_json::from_str(trimmed).ok()?;
        let name = value.get("name").and_then(Value::as_str).and_then(non_blank)?;
        let email = value.get("email").and_then(Value::as_str).and_then(non_blank);
        return Some(AuthorInput {
            name: sanitize_input(&name),
            email: sanitize_opt(email),
        });
    }
    non_blank(trimmed).map(|name| AuthorInput {
        name: sanitize_input(&name),
        email: None,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct AboutForm {
    #[serde(default, deserialize_with = "form_text")]
    pub name: String,
    #[serde(default, deserialize_with = "form_text")]
    pub headline: String,
    #[serde(default, deserialize_with = "form_text")]
    pub bio: String,
    #[serde(default, deserialize_with = "form_text")]
    pub photo: String,
    #[serde(default, deserialize_with = "form_text")]
    pub cover_image: String,
    #[serde(default, deserialize_with = "form_text")]
    pub location: String,
    #[serde(default, deserialize_with = "form_text")]
    pub email: String,
    #[serde(default, deserialize_with = "form_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "form_text")]
    pub birthday: String,
    #[serde(default, deserialize_with = "form_text")]
    pub resume_url: String,
    #[serde(default, deserialize_with = "form_json_text")]
    pub social_links: String,
}

impl FormFields for AboutForm {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "headline" => Some(&self.headline),
            "bio" => Some(&self.bio),
            "photo" => Some(&self.photo),
            "cover_image" => Some(&self.cover_image),
            "location" => Some(&self.location),
            "email" => Some(&self.email),
            "phone" => Some(&self.phone),
            "birthday" => Some(&self.birthday),
            "resume_url" => Some(&self.resume_url),
            "social_links" => Some(&self.social_links),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AboutInput {
    pub name: String,
    pub headline: Option<String>,
    pub bio: String,
    pub photo: Option<String>,
    pub cover_image: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub resume_url: Option<String>,
    pub social_links: Option<Value>,
}

impl AboutForm {
    pub fn into_input(self) -> AboutInput {
        AboutInput {
            name: sanitize_input(self.name.trim()),
            headline: sanitize_opt(non_blank(&self.headline)),
            bio: sanitize_input(self.bio.trim()),
            photo: non_blank(&self.photo),
            cover_image: non_blank(&self.cover_image),
            location: sanitize_opt(non_blank(&self.location)),
            email: non_blank(&self.email),
            phone: sanitize_opt(non_blank(&self.phone)),
            birthday: parse_date(&self.birthday),
            resume_url: non_blank(&self.resume_url),
            social_links: non_blank(&self.social_links)
                .and_then(|raw| serde_json::from_str(&raw).ok()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub admin: Option<String>,
}

impl ListQuery {
    pub fn wants_admin_view(&self) -> bool {
        self.admin
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}
