// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sample dictionary and records shared by unit tests

use crate::objects::ReferenceStore;
use std::io::Cursor;

pub const HEADER: &str = "\u{feff}1CV8LOG(ver 2.0)\r\n6df2bb92-558c-4e3b-a6b5-d22d9cf0bfd8\r\n\r\n";

pub const DICTIONARY: &str = "\u{feff}1CV8LOG(ver 2.0)\r\n6df2bb92-558c-4e3b-a6b5-d22d9cf0bfd8\r\n\r\n\
{1,bace0cc4-7a56-4443-11ea-edd56d0dbdf8,\"Администратор\",1},\r\n\
{2,\"SRV-APP01\",1},\r\n\
{3,\"1CV8C\",1},\r\n\
{3,\"BackgroundJob\",2},\r\n\
{4,\"_$Session$_.Start\",1},\r\n\
{4,\"_$Data$_.Update\",2},\r\n\
{4,\"_$Session$_.Authentication\",3},\r\n\
{5,2f1e2c3a-0000-0000-0000-000000000001,\"Документ.Реализация\",1},\r\n\
{6,\"srv01\",1},\r\n\
{7,1541,1},\r\n\
{8,1560,1},\r\n\
{9,7c0e-sep-0001,\"ОбластьДанных\",1},\r\n\
{9,7c0e-sep-0002,\"Организация\",2},\r\n\
{10,{\"N\",\"Основная\"},1,1},\r\n\
{10,{\"N\",\"ООО Ромашка\"},2,1},\r\n\
{1,d00d0000-0000-0000-0000-000000000002,\"Оператор\",2}";

/// Plain string payload, no transaction
pub const SIMPLE: &str = "{20200412134356,N,\r\n{0,0},1,1,1,2,1,I,\"2: Произвольный текст 7\",1,\r\n\
{\"S\",\"2: Простой текст 7\"},\"\",1,1,1,2,0,\r\n{0}\r\n}";

/// Committed transaction with a reference payload and separators
pub const TRANSACTION: &str = "{20201005114853,U,\r\n{243b06bad83e0,7b3156},2,1,2,13732,2,E,\"\",1,\r\n\
{\"R\",490:bace0cc47a56444311eaedd56d0dbdf8},\"Отчет производства за \"\",смену\",1,1,1,1101,0,\r\n\
{2,1,1,2,1}\r\n}";

/// Structured authentication payload
pub const AUTHENTICATION: &str = "{20201005120000,N,\r\n{0,0},1,1,1,3,3,W,\"\",0,\r\n\
{\"P\",{6,{\"S\",\"Админ\"},{\"S\",\"admin-os\"}}},\"\",1,1,1,5,0,\r\n{0}\r\n}";

pub fn store() -> ReferenceStore {
    ReferenceStore::new(Cursor::new(DICTIONARY.as_bytes().to_vec()))
}

/// A data file body made of `records`, separated the way the platform writes them
pub fn data_file(records: &[&str]) -> String {
    format!("{}{}", HEADER, records.join(",\r\n"))
}
