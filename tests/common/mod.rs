#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use fitcoach_api::app::{app, AppState};
use fitcoach_api::auth::{decode_jwt, generate_jwt, Claims, JwtError};
use fitcoach_api::database::models::User;
use fitcoach_api::services::{LookupError, UserLookup};

pub const SECRET: &str = "integration-secret";

/// In-memory user store with the same token semantics as `UserService`
pub struct StaticUsers {
    secret: String,
    users: HashMap<Uuid, User>,
}

impl StaticUsers {
    pub fn new(secret: &str, users: Vec<User>) -> Self {
        Self {
            secret: secret.to_string(),
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }
}

#[async_trait]
impl UserLookup for StaticUsers {
    async fn user_from_token(&self, token: &str) -> Result<Option<User>, LookupError> {
        match decode_jwt(token, &self.secret) {
            Ok(claims) => Ok(self.users.get(&claims.sub).cloned()),
            Err(JwtError::InvalidSecret) => Err(LookupError::SecretMissing),
            Err(_) => Ok(None),
        }
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, LookupError> {
        Ok(self.users.get(&id).cloned())
    }

    async fn ping(&self) -> Result<(), LookupError> {
        Ok(())
    }
}

pub fn user(first_name: &str, user_type: &str) -> User {
    User {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        profile_pic: Some(format!("https://cdn.example.com/{}.png", first_name.to_lowercase())),
        user_type: user_type.to_string(),
        title: None,
        rating: None,
        created_at: Utc::now(),
    }
}

pub fn token_for(user: &User) -> String {
    generate_jwt(&Claims::new(user.id, user.user_type.clone(), 1), SECRET).expect("token")
}

pub fn test_app(lookup: StaticUsers) -> Router {
    app(AppState::new(Arc::new(lookup)), &[])
}

/// Drive one request through the router and decode the JSON body
pub async fn send(router: Router, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).expect("request");

    let response = router.oneshot(request).await.expect("response");
    let status = StatusCode::from_u16(response.status().as_u16()).expect("status");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Serve `router` on an ephemeral localhost port and return its base URL
pub async fn spawn_stub(router: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{}", addr))
}
