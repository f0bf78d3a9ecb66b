// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    employees (code) {
        code -> Text,
        name -> Text,
        password_hash -> Text,
        role -> Text,
        delete_flg -> Integer,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    reports (id) {
        id -> BigInt,
        report_date -> Text,
        title -> Text,
        content -> Text,
        employee_code -> Text,
        delete_flg -> Integer,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::joinable!(reports -> employees (employee_code));

diesel::allow_tables_to_appear_in_same_query!(employees, reports);
