use std::sync::Arc;

use roost::{Action, Body, Json, Methods, Request, Status};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Clone, Deserialize, Serialize)]
pub struct Product {
    product: String,
    cost: u64,
}

/// The shopping cart, mounted at `/`.
#[derive(Default)]
pub struct Index {
    cart: RwLock<Vec<Product>>,
}

impl Index {
    async fn set_add_product_to_cart(self: Arc<Self>, body: Body, _req: Request) -> (Status, &'static str) {
        match body.json::<Product>() {
            Ok(product) => {
                self.cart.write().await.push(product);
                (Status::Created, "Product added to cart!")
            }
            Err(_) => (Status::BadRequest, "Expected {\"product\":..,\"cost\":..}"),
        }
    }

    async fn get_cart_contents(self: Arc<Self>, _req: Request) -> Json<Vec<Product>> {
        Json(self.cart.read().await.clone())
    }

    async fn get_cart_total(self: Arc<Self>, _req: Request) -> String {
        let total: u64 = self.cart.read().await.iter().map(|p| p.cost).sum();
        total.to_string()
    }
}

impl Action for Index {
    fn methods() -> Methods<Self> {
        Methods::new()
            .method("setAddProductToCart", Self::set_add_product_to_cart)
            .method("getCartContents", Self::get_cart_contents)
            .method("getCartTotal", Self::get_cart_total)
    }
}
