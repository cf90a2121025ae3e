use actix_web::web::{scope, ServiceConfig};

use crate::modules::suggestion::handle::*;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/suggestions").service(suggest_friends));
}
