//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn policy() -> RegistrationPolicy {
    RegistrationPolicy::default()
}

#[rstest]
fn default_policy_requires_three_characters(policy: RegistrationPolicy) {
    assert_eq!(policy.min_username_length, 3);
    assert_eq!(policy.min_password_length, 3);
}

#[rstest]
#[case("")]
#[case("ro")]
#[case("   ")]
#[case(" ro ")]
fn username_shorter_than_policy_is_rejected(policy: RegistrationPolicy, #[case] raw: &str) {
    let result = Username::new(raw, &policy);
    assert_eq!(result, Err(UserValidationError::UsernameTooShort { min: 3 }));
}

#[rstest]
#[case(" root")]
#[case("root ")]
#[case("\troot\n")]
fn username_is_trimmed_like_login_input(policy: RegistrationPolicy, #[case] raw: &str) {
    let username = Username::new(raw, &policy).expect("padded name is valid");
    assert_eq!(username.as_ref(), "root");
}

#[rstest]
fn username_length_counts_characters_not_bytes(policy: RegistrationPolicy) {
    let username = Username::new("åäö", &policy).expect("three characters");
    assert_eq!(username.as_ref(), "åäö");
}

#[rstest]
#[case("root", "", UserValidationError::PasswordTooShort { min: 3 })]
#[case("root", "ab", UserValidationError::PasswordTooShort { min: 3 })]
#[case("ab", "sekret", UserValidationError::UsernameTooShort { min: 3 })]
fn registration_rejects_short_inputs(
    policy: RegistrationPolicy,
    #[case] username: &str,
    #[case] password: &str,
    #[case] expected: UserValidationError,
) {
    let err = Registration::try_from_parts(username, "Superuser", password, &policy)
        .expect_err("short input must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn registration_honours_custom_policy() {
    let strict = RegistrationPolicy {
        min_username_length: 5,
        min_password_length: 8,
    };
    let err = Registration::try_from_parts("root", "Superuser", "sekret", &strict)
        .expect_err("username below custom minimum");
    assert_eq!(err.to_string(), "username must be at least 5 characters long");
}

#[rstest]
#[case(UserValidationError::UsernameTooShort { min: 3 }, "username")]
#[case(UserValidationError::PasswordTooShort { min: 3 }, "password")]
#[case(UserValidationError::InvalidId, "id")]
fn validation_errors_name_their_field(#[case] err: UserValidationError, #[case] field: &str) {
    assert_eq!(err.field(), field);
}

#[rstest]
#[case("")]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
fn user_id_rejects_invalid_input(#[case] raw: &str) {
    assert!(UserId::new(raw).is_err());
}

#[rstest]
fn user_id_from_uuid_avoids_round_trip_parse() {
    let uuid = uuid::Uuid::parse_str(VALID_ID).expect("valid UUID");
    let user_id = UserId::from_uuid(uuid);

    assert_eq!(user_id.as_uuid(), &uuid);
    assert_eq!(user_id.as_ref(), VALID_ID);
}

#[rstest]
fn password_digest_debug_is_redacted() {
    let digest = PasswordDigest::new("$argon2id$v=19$secret");
    let rendered = format!("{digest:?}");
    assert!(!rendered.contains("argon2id"));
}

#[rstest]
fn profile_copies_public_fields_only(policy: RegistrationPolicy) {
    let username = Username::new("root", &policy).expect("valid username");
    let user = User::new(
        UserId::random(),
        username,
        "Superuser",
        PasswordDigest::new("digest"),
        Vec::new(),
    );
    let profile = user.profile();
    assert_eq!(&profile.id, user.id());
    assert_eq!(profile.username.as_ref(), "root");
    assert_eq!(profile.name, "Superuser");
}

#[derive(Debug, Clone)]
struct RegistrationRequest {
    username: String,
    name: String,
    password: String,
}

#[given("a registration request for root")]
fn a_registration_request_for_root() -> RegistrationRequest {
    RegistrationRequest {
        username: "root".to_owned(),
        name: "Superuser".to_owned(),
        password: "sekret".to_owned(),
    }
}

#[when("the registration is validated")]
fn the_registration_is_validated(
    request: RegistrationRequest,
    policy: RegistrationPolicy,
) -> Result<Registration, UserValidationError> {
    Registration::try_from_parts(&request.username, &request.name, &request.password, &policy)
}

#[then("the plain-text password is kept for hashing")]
fn the_plain_text_password_is_kept(result: Result<Registration, UserValidationError>) {
    let registration = result.expect("registration should validate");
    assert_eq!(registration.username().as_ref(), "root");
    assert_eq!(registration.name(), "Superuser");
    assert_eq!(registration.password(), "sekret");
}

#[rstest]
fn validating_a_registration_happy_path(policy: RegistrationPolicy) {
    let request = a_registration_request_for_root();
    let result = the_registration_is_validated(request, policy);
    the_plain_text_password_is_kept(result);
}
