mod property_split;
