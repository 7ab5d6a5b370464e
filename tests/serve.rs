//! Compiled routes served over a real socket.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use roost::compiler::ListFiles;
use roost::{Action, App, Body, Config, Methods, Registry, Request, Server, Status};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, oneshot};

struct Folder;

impl ListFiles for Folder {
    async fn list_files(&self, _folder: &Path) -> io::Result<Vec<String>> {
        Ok(vec!["index.rs".to_owned(), "auth.rs".to_owned()])
    }
}

#[derive(Default)]
struct Index {
    notes: Mutex<Vec<String>>,
}

impl Index {
    async fn fetch_all(self: Arc<Self>, _req: Request) -> String {
        self.notes.lock().await.join(",")
    }

    async fn create(self: Arc<Self>, body: Body, _req: Request) -> Status {
        match body.text() {
            Some(text) if !text.is_empty() => {
                self.notes.lock().await.push(text.to_owned());
                Status::Created
            }
            _ => Status::BadRequest,
        }
    }
}

impl Action for Index {
    fn methods() -> Methods<Self> {
        Methods::new()
            .method("fetchAll", Self::fetch_all)
            .method("create", Self::create)
    }
}

#[derive(Default)]
struct Auth;

impl Auth {
    async fn delete(self: Arc<Self>, id: String, _req: Request) -> String {
        format!("logout of {id}")
    }
}

impl Action for Auth {
    fn methods() -> Methods<Self> {
        Methods::new().method("delete", Self::delete)
    }
}

async fn send(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_compiled_routes() {
    let registry = Registry::new().action::<Index>("index").action::<Auth>("auth");
    let compiled = App::new(Config::default(), registry).with_files(Folder).compile().await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(
        Server::from_listener(listener).serve_until(compiled.into_router(), async {
            let _ = stopped.await;
        }),
    );

    let res = send(addr, "POST / HTTP/1.1\r\nhost: test\r\ncontent-length: 5\r\nconnection: close\r\n\r\nhello").await;
    assert!(res.starts_with("HTTP/1.1 201"), "{res}");

    let res = send(addr, "GET / HTTP/1.1\r\nhost: test\r\nconnection: close\r\n\r\n").await;
    assert!(res.starts_with("HTTP/1.1 200"), "{res}");
    assert!(res.ends_with("hello"), "{res}");

    let res = send(addr, "DELETE /auth/42 HTTP/1.1\r\nhost: test\r\nconnection: close\r\n\r\n").await;
    assert!(res.ends_with("logout of 42"), "{res}");

    let res = send(addr, "GET /auth/42 HTTP/1.1\r\nhost: test\r\nconnection: close\r\n\r\n").await;
    assert!(res.starts_with("HTTP/1.1 404"), "{res}");

    let res = send(addr, "PUT / HTTP/1.1\r\nhost: test\r\nconnection: close\r\n\r\n").await;
    assert!(res.starts_with("HTTP/1.1 405"), "{res}");

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn shutdown_closes_idle_keep_alive_connections() {
    let registry = Registry::new().action::<Index>("index");
    let compiled = App::new(Config::default(), registry).with_files(Folder).compile().await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(
        Server::from_listener(listener).serve_until(compiled.into_router(), async {
            let _ = stopped.await;
        }),
    );

    // No `connection: close`: the connection stays open after the response.
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET / HTTP/1.1\r\nhost: test\r\n\r\n").await.unwrap();
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await.unwrap();
        assert!(n > 0, "connection closed before the response");
        head.extend_from_slice(&buf[..n]);
    }
    assert!(head.starts_with(b"HTTP/1.1 200"));

    stop.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(3), server)
        .await
        .expect("server did not drain the idle connection")
        .unwrap()
        .unwrap();

    // The server hung up on the client.
    let mut rest = Vec::new();
    stream.read_to_end(&mut rest).await.unwrap();
}
