use std::collections::BTreeMap;
use std::sync::Arc;

use roost::{Action, Body, IntoResponse, Json, Methods, Request, Response, Status};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Clone, Deserialize, Serialize)]
pub struct Person {
    first_name: String,
    last_name: String,
    email: String,
}

#[derive(Deserialize)]
struct PersonPatch {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

/// Users kept in memory, keyed by uid.
pub struct User {
    people: RwLock<BTreeMap<u64, Person>>,
}

impl User {
    pub fn seeded() -> Self {
        let people = [
            ("Bart", "Simpson", "eat@myshorts.org"),
            ("Lisa", "Simpson", "lisa.simpson@harvard.edu"),
        ]
        .into_iter()
        .enumerate()
        .map(|(uid, (first, last, email))| {
            let person = Person {
                first_name: first.to_owned(),
                last_name: last.to_owned(),
                email: email.to_owned(),
            };
            (uid as u64, person)
        })
        .collect();
        Self { people: RwLock::new(people) }
    }

    async fn fetch_all(self: Arc<Self>, _req: Request) -> Json<BTreeMap<u64, Person>> {
        Json(self.people.read().await.clone())
    }

    async fn fetch_single(self: Arc<Self>, uid: String, _req: Request) -> Response {
        let Ok(uid) = uid.parse::<u64>() else {
            return Response::status(Status::BadRequest);
        };
        match self.people.read().await.get(&uid) {
            Some(person) => Json(person.clone()).into_response(),
            None => Response::status(Status::NotFound),
        }
    }

    async fn create(self: Arc<Self>, body: Body, _req: Request) -> (Status, String) {
        let Ok(person) = body.json::<Person>() else {
            return (Status::BadRequest, "Expected first_name, last_name and email".to_owned());
        };
        let mut people = self.people.write().await;
        let uid = people.keys().next_back().map_or(0, |last| last + 1);
        people.insert(uid, person);
        (Status::Created, uid.to_string())
    }

    async fn update(self: Arc<Self>, uid: String, body: Body, _req: Request) -> Status {
        let (Ok(uid), Ok(patch)) = (uid.parse::<u64>(), body.json::<PersonPatch>()) else {
            return Status::BadRequest;
        };
        let mut people = self.people.write().await;
        let Some(person) = people.get_mut(&uid) else {
            return Status::NotFound;
        };
        if let Some(first_name) = patch.first_name {
            person.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            person.last_name = last_name;
        }
        if let Some(email) = patch.email {
            person.email = email;
        }
        Status::NoContent
    }

    async fn delete(self: Arc<Self>, uid: String, _req: Request) -> Status {
        let Ok(uid) = uid.parse::<u64>() else {
            return Status::BadRequest;
        };
        match self.people.write().await.remove(&uid) {
            Some(_) => Status::NoContent,
            None => Status::NotFound,
        }
    }
}

impl Action for User {
    fn methods() -> Methods<Self> {
        Methods::new()
            .method("fetchAll", Self::fetch_all)
            .method("fetchSingle", Self::fetch_single)
            .method("create", Self::create)
            .method("update", Self::update)
            .method("delete", Self::delete)
    }
}
