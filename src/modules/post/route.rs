use actix_web::web::{scope, ServiceConfig};

use crate::modules::post::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/posts")
            .service(create_post)
            .service(list_posts)
            .service(feed)
            .service(like_post)
            .service(unlike_post)
            .service(comment_post)
            .service(delete_post),
    );
}
