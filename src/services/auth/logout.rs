use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::services::invalidate_user_cache;
use crate::utils::jwt::{ACCESS_TOKEN_COOKIE, JwtUtils, REFRESH_TOKEN_COOKIE};

/// 清除会话 Cookie，令牌仍有效时移除缓存的用户
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(user_id) = JwtUtils::extract_access_token(request)
        .and_then(|token| JwtUtils::verify_access_token(&token).ok())
        .and_then(|claims| claims.user_id())
    {
        invalidate_user_cache(request, user_id).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_expired_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(JwtUtils::create_expired_cookie(REFRESH_TOKEN_COOKIE))
        .json(ApiResponse::success_empty("Logout successful")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_logout_expires_both_cookies() {
        let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_http_request();
        let resp = handle_logout(&req).await.unwrap();
        let names: Vec<String> = resp.cookies().map(|c| c.name().to_string()).collect();
        assert!(names.contains(&ACCESS_TOKEN_COOKIE.to_string()));
        assert!(names.contains(&REFRESH_TOKEN_COOKIE.to_string()));
        assert!(resp.cookies().all(|c| c.value().is_empty()));
    }
}
