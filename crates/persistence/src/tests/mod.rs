// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use daily_report_domain::{
    Employee, EmployeeCode, NewEmployee, Report, ReportDraft, Role, validate_report_fields,
};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

use crate::{BcryptHasher, Persistence};

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_hasher() -> BcryptHasher {
    BcryptHasher::new(TEST_BCRYPT_COST)
}

pub fn create_test_timestamp() -> OffsetDateTime {
    datetime!(2026-02-10 08:15:30.123456789 UTC)
}

pub fn create_test_employee(code: &str, role: Role) -> Employee {
    Employee::new(
        NewEmployee {
            code: EmployeeCode::new(code),
            name: format!("Employee {code}"),
            role,
        },
        String::from("$2b$04$notarealhashnotarealhashnotarealhashnotareal"),
        create_test_timestamp(),
    )
}

pub fn create_test_report(owner: &str, report_date: Date, title: &str) -> Report {
    let fields = validate_report_fields(&ReportDraft::new(report_date, title, "Daily notes"))
        .unwrap();
    Report::new(EmployeeCode::new(owner), fields, create_test_timestamp())
}
