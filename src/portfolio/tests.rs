//! Tests for portfolio module
//!
//! Covers form parsing, the content validators (display order in
//! particular) and the public/admin routes end to end.

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::app::build_router;
    use crate::common::test_support::{admin_token, send, test_app, test_state};
    use crate::common::validation::{OrderValidationContext, OrderValue, OrderedItem};
    use crate::common::{AppConfig, Validator};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use models::*;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use validators::*;

    fn project_form(value: Value) -> ProjectForm {
        serde_json::from_value(value).unwrap()
    }

    fn siblings() -> Vec<OrderedItem> {
        vec![
            OrderedItem { id: 1, order: 0 },
            OrderedItem { id: 2, order: 3 },
        ]
    }

    // ------------------------------------------------------------------
    // Forms and validators
    // ------------------------------------------------------------------

    #[test]
    fn test_project_form_accepts_text_and_json_lists() {
        let from_text = project_form(json!({
            "title": "Portfolio",
            "description": "Site",
            "tech": "Rust, Axum , ,SQLite",
            "order": "2"
        }))
        .into_input();
        assert_eq!(from_text.tech, vec!["Rust", "Axum", "SQLite"]);
        assert_eq!(from_text.order, Some(2));

        let from_json = project_form(json!({
            "title": "Portfolio",
            "description": "Site",
            "tech_stack": ["Rust", "Axum"],
            "links": [
                { "name": "GitHub", "url": "https://github.com/example" },
                { "name": "Empty", "url": "" }
            ],
            "categories": [{ "name": "web" }, "cli"],
            "order": 4
        }))
        .into_input();
        assert_eq!(from_json.tech, vec!["Rust", "Axum"]);
        assert_eq!(from_json.links.len(), 1);
        assert_eq!(from_json.links[0].name, "GitHub");
        assert_eq!(from_json.categories, vec!["web", "cli"]);
        assert_eq!(from_json.order, Some(4));

        // Fractional numbers reach the order validator instead of failing to parse
        let fractional = project_form(json!({ "title": "A", "description": "B", "order": 2.5 }));
        let validator = ProjectValidator {
            order_context: OrderValidationContext::for_create(siblings()),
        };
        assert!(validator.validate(&fractional).is_valid());
        assert_eq!(fractional.into_input().order, Some(2));

        let taken = project_form(json!({ "title": "A", "description": "B", "order": 3.7 }));
        assert_eq!(
            validator.validate(&taken).get("order"),
            Some("Display order 3 is already used. Please choose a different number.")
        );
    }

    #[test]
    fn test_project_form_escapes_text_but_not_urls() {
        let input = project_form(json!({
            "title": "<b>Bold</b>",
            "description": "Tom & Jerry",
            "image": "https://example.com/a.png?x=1&y=2"
        }))
        .into_input();

        assert_eq!(input.title, "&lt;b&gt;Bold&lt;/b&gt;");
        assert_eq!(input.description, "Tom &amp; Jerry");
        assert_eq!(input.image.as_deref(), Some("https://example.com/a.png?x=1&y=2"));
        assert_eq!(input.is_visible, None);
        assert_eq!(input.order, None);
    }

    #[test]
    fn test_project_validator_order_rules() {
        let validator = ProjectValidator {
            order_context: OrderValidationContext::for_create(siblings()),
        };

        let ok = project_form(json!({ "title": "A", "description": "B", "order": 1 }));
        assert!(validator.validate(&ok).is_valid());

        // Order is optional
        let absent = project_form(json!({ "title": "A", "description": "B" }));
        assert!(validator.validate(&absent).is_valid());

        let taken = project_form(json!({ "title": "A", "description": "B", "order": 3 }));
        assert_eq!(
            validator.validate(&taken).get("order"),
            Some("Display order 3 is already used. Please choose a different number.")
        );

        let negative = project_form(json!({ "title": "A", "description": "B", "order": "-1" }));
        assert_eq!(
            validator.validate(&negative).get("order"),
            Some("Display order cannot be negative")
        );

        let garbage = project_form(json!({ "title": "A", "description": "B", "order": "abc" }));
        assert_eq!(
            validator.validate(&garbage).get("order"),
            Some("Display order must be a valid number")
        );

        // Editing the record that holds 3 may keep it
        let own = ProjectValidator {
            order_context: OrderValidationContext::for_update(2, siblings()),
        };
        assert!(own.validate(&taken).is_valid());
    }

    #[test]
    fn test_project_validator_field_rules() {
        let validator = ProjectValidator {
            order_context: OrderValidationContext::default(),
        };
        let result = validator.validate(&project_form(json!({
            "title": "",
            "description": "",
            "start_date": "2024-05-01",
            "end_date": "2024-01-01",
            "links": "{not json",
            "team_size": "-2",
            "image": "not a url"
        })));

        assert_eq!(result.get("title"), Some("title is required"));
        assert_eq!(result.get("description"), Some("description is required"));
        assert_eq!(result.get("end_date"), Some("End date cannot be before start date"));
        assert_eq!(result.get("links"), Some("Links must be valid JSON format"));
        assert_eq!(result.get("team_size"), Some("Team Size must be a positive number"));
        assert_eq!(result.get("image_url"), Some("Image URL must be a valid URL"));
    }

    #[test]
    fn test_project_links_must_be_array_of_linked_objects() {
        let validator = ProjectValidator {
            order_context: OrderValidationContext::default(),
        };
        let with_links = |links: Value| {
            project_form(json!({ "title": "A", "description": "B", "links": links }))
        };

        // A lone object would convert to no links at all
        let single = validator.validate(&with_links(json!(
            r#"{"name":"Repo","url":"https://x.io"}"#
        )));
        assert_eq!(
            single.get("links"),
            Some("Links must be a JSON array of {name, url} objects")
        );

        let strings = validator.validate(&with_links(json!(["https://x.io"])));
        assert!(strings.contains("links"));

        let missing_url = validator.validate(&with_links(json!([{ "name": "Repo" }])));
        assert_eq!(missing_url.get("links"), Some("Each link must have a valid URL"));

        let bad_url = validator.validate(&with_links(json!([{ "name": "Repo", "url": "x.io" }])));
        assert_eq!(bad_url.get("links"), Some("Each link must have a valid URL"));

        let good = with_links(json!([{ "name": "Repo", "url": "https://x.io" }]));
        assert!(validator.validate(&good).is_valid());
        assert_eq!(good.into_input().links.len(), 1);
    }

    #[test]
    fn test_about_social_links_must_be_object() {
        let about = |social_links: Value| -> AboutForm {
            serde_json::from_value(json!({
                "name": "Jane",
                "bio": "Builder",
                "social_links": social_links
            }))
            .unwrap()
        };

        let array = AboutValidator.validate(&about(json!("[1,2]")));
        assert_eq!(
            array.get("social_links"),
            Some("Social Links must be a JSON object")
        );

        let object = AboutValidator.validate(&about(json!({ "github": "https://github.com/jane" })));
        assert!(object.is_valid());
    }

    #[test]
    fn test_experience_period() {
        let mut experience = Experience {
            id: 1,
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: None,
            start_date: Some("2021-03-15".to_string()),
            end_date: Some("2023-07-01".to_string()),
            is_current: 0,
            duration: None,
            responsibilities: None,
            achievements: None,
            technologies: None,
            color: None,
            order: 0,
            is_visible: 1,
            created_at: None,
        };
        assert_eq!(experience.period(), "03/2021 - 07/2023");

        experience.is_current = 1;
        assert_eq!(experience.period(), "03/2021 - Present");
    }

    #[test]
    fn test_blog_form_tags_author_and_date() {
        let form: BlogForm = serde_json::from_value(json!({
            "title": "Hello",
            "content": "World",
            "date": "2024-02-03",
            "tags": ["rust", "web", "rust"],
            "author": { "name": "Jane", "email": "jane@example.com" }
        }))
        .unwrap();
        assert!(BlogValidator.validate(&form).is_valid());

        let input = form.into_input();
        assert_eq!(input.tags, vec!["rust", "web"]);
        assert_eq!(input.date.as_deref(), Some("2024-02-03T00:00:00"));
        assert_eq!(
            input.author,
            Some(AuthorInput {
                name: "Jane".to_string(),
                email: Some("jane@example.com".to_string()),
            })
        );

        let plain: BlogForm = serde_json::from_value(json!({
            "title": "Hello",
            "content": "World",
            "tags": "b, a",
            "author": "Sam"
        }))
        .unwrap();
        let input = plain.into_input();
        assert_eq!(input.tags, vec!["a", "b"]);
        assert_eq!(input.author.map(|a| a.name).as_deref(), Some("Sam"));
        assert_eq!(input.date, None);
    }

    #[test]
    fn test_blog_validator_rejects_bad_date() {
        let form: BlogForm = serde_json::from_value(json!({
            "title": "Hello",
            "content": "World",
            "date": "yesterday",
            "reading_time": "five"
        }))
        .unwrap();
        let result = BlogValidator.validate(&form);
        assert_eq!(result.get("date"), Some("Date must be a valid date"));
        assert_eq!(
            result.get("reading_time"),
            Some("Reading Time must be a positive number")
        );
    }

    #[test]
    fn test_about_validator() {
        let form: AboutForm = serde_json::from_value(json!({
            "name": "Jane",
            "bio": "Builder",
            "email": "jane@",
            "social_links": "{broken",
            "birthday": "03/02/1990"
        }))
        .unwrap();
        let result = AboutValidator.validate(&form);
        assert_eq!(result.get("email"), Some("Please enter a valid email address"));
        assert_eq!(
            result.get("social_links"),
            Some("Social Links must be valid JSON format")
        );
        assert_eq!(result.get("birthday"), Some("Birthday must be in YYYY-MM-DD format"));
    }

    #[test]
    fn test_list_query_admin_flag() {
        let query = ListQuery {
            admin: Some("TRUE".to_string()),
        };
        assert!(query.wants_admin_view());
        assert!(!ListQuery::default().wants_admin_view());
        assert_eq!(OrderValue::from("7").as_int(), Some(7));
    }

    // ------------------------------------------------------------------
    // Routes
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_project_mutations_require_admin() {
        let (app, _state) = test_app().await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/projects",
            None,
            Some(json!({ "title": "A", "description": "B" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::DELETE, "/api/projects/1", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_project_order_lifecycle() {
        let (app, state) = test_app().await;
        let token = admin_token(&state);

        let (status, first) = send(
            &app,
            Method::POST,
            "/api/projects",
            Some(&token),
            Some(json!({ "title": "First", "description": "One", "tech": "Rust, Axum" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["order"], 0);
        assert_eq!(first["tech"], json!(["Rust", "Axum"]));
        assert_eq!(first["is_visible"], json!(true));

        // Trailing slash is accepted; absent order goes after the highest
        let (status, second) = send(
            &app,
            Method::POST,
            "/api/projects/",
            Some(&token),
            Some(json!({ "title": "Second", "description": "Two" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(second["order"], 1);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/projects",
            Some(&token),
            Some(json!({ "title": "Third", "description": "Three", "order": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"],
            "Display order 1 is already used. Please choose a different number."
        );
        assert_eq!(
            body["fields"]["order"],
            "Display order 1 is already used. Please choose a different number."
        );

        // A record keeps its own order on update
        let second_id = second["id"].as_i64().unwrap();
        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/projects/{}", second_id),
            Some(&token),
            Some(json!({ "title": "Second!", "description": "Two", "order": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Second!");
        assert_eq!(updated["order"], 1);

        // Moving onto a sibling's order is rejected
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/projects/{}", second_id),
            Some(&token),
            Some(json!({ "title": "Second", "description": "Two", "order": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/projects/999",
            Some(&token),
            Some(json!({ "title": "X", "description": "Y" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, list) = send(&app, Method::GET, "/api/projects", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["First", "Second!"]);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/projects/{}", second_id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/projects/{}", second_id),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_project_with_unusable_links_is_rejected() {
        let (app, state) = test_app().await;
        let token = admin_token(&state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/projects",
            Some(&token),
            Some(json!({
                "title": "A",
                "description": "B",
                "links": r#"{"name":"Repo","url":"https://x.io"}"#
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, project) = send(
            &app,
            Method::POST,
            "/api/projects",
            Some(&token),
            Some(json!({
                "title": "A",
                "description": "B",
                "links": [{ "name": "Repo", "url": "https://x.io" }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(project["links"][0]["url"], "https://x.io");
    }

    #[tokio::test]
    async fn test_simultaneous_creates_cannot_share_an_order() {
        let (app, state) = test_app().await;
        let token = admin_token(&state);

        let create = |title: &'static str| {
            let app = app.clone();
            let token = token.clone();
            async move {
                send(
                    &app,
                    Method::POST,
                    "/api/projects",
                    Some(&token),
                    Some(json!({ "title": title, "description": "Same slot", "order": 4 })),
                )
                .await
            }
        };

        let ((first, _), (second, _)) = tokio::join!(create("Left"), create("Right"));
        let mut statuses = vec![first, second];
        statuses.sort_by_key(|status| status.as_u16());
        assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);

        let (_, list) = send(&app, Method::GET, "/api/projects", None, None).await;
        let orders: Vec<&Value> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|project| &project["order"])
            .collect();
        assert_eq!(orders, vec![&json!(4)]);
    }

    #[tokio::test]
    async fn test_hidden_project_only_for_admin() {
        let (app, state) = test_app().await;
        let token = admin_token(&state);

        let (_, hidden) = send(
            &app,
            Method::POST,
            "/api/projects",
            Some(&token),
            Some(json!({ "title": "Secret", "description": "WIP", "is_visible": false })),
        )
        .await;
        let uri = format!("/api/projects/{}", hidden["id"]);

        let (status, _) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_visible"], json!(false));

        let (_, public) = send(&app, Method::GET, "/api/projects", None, None).await;
        assert_eq!(public, json!([]));

        let (_, all) = send(&app, Method::GET, "/api/projects/admin", Some(&token), None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);

        // Omitted flag keeps the stored value on update
        let (_, updated) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "title": "Secret", "description": "Still WIP" })),
        )
        .await;
        assert_eq!(updated["is_visible"], json!(false));
    }

    #[tokio::test]
    async fn test_experience_listing_and_admin_view() {
        let (app, state) = test_app().await;
        let token = admin_token(&state);

        for (title, order, visible) in [("Junior", 0, true), ("Senior", 1, true), ("Draft", 2, false)] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/experiences",
                Some(&token),
                Some(json!({
                    "title": title,
                    "company": "Acme",
                    "start_date": "2020-01-01",
                    "is_current": true,
                    "responsibilities": "Ship\nReview",
                    "order": order,
                    "is_visible": visible
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, list) = send(&app, Method::GET, "/api/experiences", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["title"], "Senior");
        assert_eq!(list[0]["period"], "01/2020 - Present");
        assert_eq!(list[0]["responsibilities"], json!(["Ship", "Review"]));

        let (status, _) = send(&app, Method::GET, "/api/experiences?admin=true", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, all) = send(
            &app,
            Method::GET,
            "/api/experiences?admin=true",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 3);
        assert_eq!(all[0]["title"], "Draft");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/experiences",
            Some(&token),
            Some(json!({
                "title": "Lead",
                "company": "Acme",
                "start_date": "2024-01-01",
                "end_date": "2023-01-01"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"]["end_date"], "End date cannot be before start date");
    }

    #[tokio::test]
    async fn test_technical_skills_order_and_update() {
        let (app, state) = test_app().await;
        let token = admin_token(&state);

        let (_, backend) = send(
            &app,
            Method::POST,
            "/api/technical-skills",
            Some(&token),
            Some(json!({ "title": "Backend", "skills": ["Rust", "Go"], "order": 5 })),
        )
        .await;
        let (_, frontend) = send(
            &app,
            Method::POST,
            "/api/technical-skills",
            Some(&token),
            Some(json!({ "title": "Frontend", "skills": "React, Vue", "order": 1 })),
        )
        .await;
        assert_eq!(frontend["skills"], json!(["React", "Vue"]));

        let (_, list) = send(&app, Method::GET, "/api/technical-skills", None, None).await;
        assert_eq!(list[0]["title"], "Frontend");
        assert_eq!(list[1]["title"], "Backend");

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/technical-skills/{}", frontend["id"]),
            Some(&token),
            Some(json!({ "title": "Frontend", "order": 5 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"]["order"], "Display order 5 is already used. Please choose a different number.");

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/technical-skills/{}", backend["id"]),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_certification_crud() {
        let (app, state) = test_app().await;
        let token = admin_token(&state);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/certifications",
            Some(&token),
            Some(json!({ "name": "CKA", "issuer": "CNCF", "credential_url": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"]["credential_url"], "Credential URL must be a valid URL");

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/certifications",
            Some(&token),
            Some(json!({ "name": "CKA", "issuer": "CNCF", "skills": "k8s, helm" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["skills"], json!(["k8s", "helm"]));

        let uri = format!("/api/certifications/{}", created["id"]);
        let (status, updated) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "name": "CKAD", "issuer": "CNCF" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "CKAD");

        let (_, list) = send(&app, Method::GET, "/api/certifications", None, None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_blog_with_author_and_tags() {
        let (app, state) = test_app().await;
        let token = admin_token(&state);

        let (status, blog) = send(
            &app,
            Method::POST,
            "/api/blogs",
            Some(&token),
            Some(json!({
                "title": "Hello",
                "content": "First post",
                "date": "2024-02-03T10:30:00",
                "tags": "rust, web",
                "author": "Jane"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(blog["author"]["name"], "Jane");
        assert_eq!(blog["date"], "2024-02-03T10:30:00");
        let tags: Vec<&str> = blog["tags"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(tags, vec!["rust", "web"]);

        // Same author name resolves to the same record; tags are replaced
        let uri = format!("/api/blogs/{}", blog["id"]);
        let (status, updated) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({
                "title": "Hello again",
                "content": "Edited",
                "tags": ["axum"],
                "author": "Jane",
                "is_visible": false
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["author"]["id"], blog["author"]["id"]);
        assert_eq!(updated["tags"].as_array().unwrap().len(), 1);
        assert_eq!(updated["date"], "2024-02-03T10:30:00");

        let (status, _) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, public) = send(&app, Method::GET, "/api/blogs", None, None).await;
        assert_eq!(public, json!([]));
        let (_, all) = send(&app, Method::GET, "/api/blogs/admin", Some(&token), None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let links = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blog_tags")
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(links, 0);
    }

    #[tokio::test]
    async fn test_about_singleton() {
        let (app, state) = test_app().await;
        let token = admin_token(&state);

        let (status, _) = send(&app, Method::GET, "/api/about", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/about",
            Some(&token),
            Some(json!({ "name": "Jane", "bio": "Hi" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let payload = json!({
            "name": "Jane",
            "bio": "Builder",
            "social_links": { "github": "https://github.com/jane" }
        });
        let (status, about) =
            send(&app, Method::POST, "/api/about", Some(&token), Some(payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(about["social_links"]["github"], "https://github.com/jane");

        let (status, body) =
            send(&app, Method::POST, "/api/about", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "About info already exists. Use PUT to update.");

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/api/about",
            Some(&token),
            Some(json!({ "name": "Jane Doe", "bio": "Builder" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Jane Doe");

        let (status, _) = send(&app, Method::DELETE, "/api/about", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, "/api/about/", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resume_download() {
        let (app, _state) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/api/resume", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Resume not found");

        let path = std::env::temp_dir().join(format!("resume-test-{}.pdf", std::process::id()));
        std::fs::write(&path, b"%PDF-1.4 test").unwrap();

        let mut state = test_state().await;
        state.config = Arc::new(AppConfig {
            resume_path: path.clone(),
            resume_download_name: "Jane_Resume.pdf".to_string(),
            ..AppConfig::default()
        });
        let app = build_router(state);

        let response = app
            .oneshot(Request::get("/api/resume").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane_Resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4 test");

        let _ = std::fs::remove_file(path);
    }
}
