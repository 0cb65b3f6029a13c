pub mod sos_request;
