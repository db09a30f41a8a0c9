use assert_cmd::Command;
use predicates::prelude::*;

const TEST_PEM_CERT: &str = r"-----BEGIN CERTIFICATE-----
MIICLDCCAdKgAwIBAgIBADAKBggqhkjOPQQDAjB9MQswCQYDVQQGEwJCRTEPMA0G
A1UEChMGR251VExTMSUwIwYDVQQLExxHbnVUTFMgY2VydGlmaWNhdGUgYXV0aG9y
aXR5MQ8wDQYDVQQIEwZMZXV2ZW4xJTAjBgNVBAMTHEdudVRMUyBjZXJ0aWZpY2F0
ZSBhdXRob3JpdHkwHhcNMTEwNTIzMjAzODIxWhcNMTIxMjIyMDc0MTUxWjB9MQsw
CQYDVQQGEwJCRTEPMA0GA1UEChMGR251VExTMSUwIwYDVQQLExxHbnVUTFMgY2Vy
dGlmaWNhdGUgYXV0aG9yaXR5MQ8wDQYDVQQIEwZMZXV2ZW4xJTAjBgNVBAMTHEdu
dVRMUyBjZXJ0aWZpY2F0ZSBhdXRob3JpdHkwWTATBgcqhkjOPQIBBggqhkjOPQMB
BwNCAARS2I0jiuNn14Y2sSALCX3IybqiIJUvxUpj+oNfzngvj/Niyv2394BWnW4X
uQ4RTEiywK87WRcWMGgJB5kX/t2no0MwQTAPBgNVHRMBAf8EBTADAQH/MA8GA1Ud
DwEB/wQFAwMHBgAwHQYDVR0OBBYEFPC0gf6YEr+1KLlkQAPLzB9mTigDMAoGCCqG
SM49BAMCA0gAMEUCIDGuwD1KPyG+hRf88MeyMQcqOFZD0TbVleF+UsAGQ4enAiEA
l4wOuDwKQa+upc8GftXE2C//4mKANBC6It01gUaTIpo=
-----END CERTIFICATE-----";

fn gossl() -> Command {
    Command::cargo_bin("gossl").unwrap()
}

#[test]
fn test_version() {
    gossl()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("gossl "));
}

#[test]
fn test_asn1_show_pem_certificate() {
    gossl()
        .args(["asn1", "show"])
        .write_stdin(TEST_PEM_CERT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequence"))
        .stdout(predicate::str::contains("ObjectIdentifier"));
}

#[test]
fn test_asn1_guess_certificate() {
    gossl()
        .args(["asn1", "guess"])
        .write_stdin(TEST_PEM_CERT)
        .assert()
        .success()
        .stdout(predicate::str::contains("X.509 certificate"));
}

#[test]
fn test_format_detects_pem_certificate() {
    gossl()
        .arg("format")
        .write_stdin(TEST_PEM_CERT)
        .assert()
        .success()
        .stdout(predicate::str::contains("PEM -> Certificate"));
}

#[test]
fn test_cert_show() {
    gossl()
        .args(["cert", "show"])
        .write_stdin(TEST_PEM_CERT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Serial Number: 0"))
        .stdout(predicate::str::contains("PEM[(CERTIFICATE) Certificate Certificate]"));
}

#[test]
fn test_error_message_prefix() {
    gossl()
        .args(["asn1", "show"])
        .write_stdin("garbage input")
        .assert()
        .failure()
        .stderr(predicate::str::contains("gossl error:"));
}
