use super::*;

#[test]
fn every_route_parses_back_from_its_path() {
    for route in Route::ALL {
        assert_eq!(Route::from_path(route.path()), Some(route), "{route}");
    }
}

#[test]
fn from_path_tolerates_trailing_slash_and_query() {
    assert_eq!(Route::from_path("/collectors/approval/"), Some(Route::CollectorApproval));
    assert_eq!(Route::from_path("/login?next=%2Fcompany%2Fprofile"), Some(Route::Login));
    assert_eq!(Route::from_path(""), Some(Route::Home));
    assert_eq!(Route::from_path("/supervisor"), None);
}

#[test]
fn after_login_depends_on_role() {
    assert_eq!(Route::after_login(Role::Supervisor).path(), "/supervisor/dashboard");
    assert_eq!(Route::after_login(Role::Admin).path(), "/admin/dashboard");
}

#[test]
fn unauthenticated_error_redirects_to_login() {
    assert_eq!(redirect_for(&ApiError::Unauthenticated), Some(Route::Login));
    assert_eq!(redirect_for(&ApiError::Transport("refused".into())), None);
    assert_eq!(redirect_for(&ApiError::application(403, None)), None);
}

#[test]
fn guard_sends_anonymous_users_to_login() {
    assert_eq!(guard(Route::CompanyProfile, false), Some(Route::Login));
    assert_eq!(guard(Route::CompanyProfile, true), None);
    assert_eq!(guard(Route::RegisterCompany, false), None);
}

#[test]
fn unknown_route_string_is_an_error() {
    assert!("/nowhere".parse::<Route>().is_err());
    assert_eq!(" /assign/collector ".parse::<Route>().unwrap(), Route::AssignCollector);
}
